/// Form factor resolved once at startup and threaded through camera setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeviceMode {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceMode {
    pub fn is_mobile(self) -> bool {
        self == DeviceMode::Mobile
    }
}

// Lower-case user-agent fragments of phones and tablets
const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "mobile",
    "tablet",
    "blackberry",
    "bb10",
    "iemobile",
    "opera mini",
    "opera mobi",
    "silk/",
    "kindle",
    "webos",
    "windows phone",
    "playbook",
    "fennec",
];

/// Pure capability check on the user agent and touch support.
///
/// iPadOS reports a desktop Safari user agent, so a `Macintosh` agent with
/// multi-touch is treated as a tablet.
pub fn detect(user_agent: &str, max_touch_points: i32) -> DeviceMode {
    let ua = user_agent.to_ascii_lowercase();
    if MOBILE_UA_TOKENS.iter().any(|t| ua.contains(t)) {
        return DeviceMode::Mobile;
    }
    if ua.contains("macintosh") && max_touch_points > 1 {
        return DeviceMode::Mobile;
    }
    DeviceMode::Desktop
}
