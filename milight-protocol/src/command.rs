/// Length of every command payload carried inside a frame.
pub const COMMAND_LEN: usize = 9;

const ZONE_PREFIX: [u8; 4] = [0x31, 0x00, 0x00, 0x08];
const LAMP_PREFIX: [u8; 4] = [0x31, 0x00, 0x00, 0x00];
const LINK_PREFIX: [u8; 4] = [0x3D, 0x00, 0x00, 0x08];
const UNLINK_PREFIX: [u8; 4] = [0x3E, 0x00, 0x00, 0x08];

/// A single command payload, before session, zone and checksum are added.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    // RGB+CCT zone commands
    Hue(u8),
    WarmWhite(u8),
    Saturation(u8),
    Brightness(u8),
    Special(SpecialMode),
    Disco(u8),

    // Pairing
    Link,
    Unlink,

    // iBox1 built-in lamp
    Lamp(LampCommand),
}

impl Command {
    /// Serialize to the 9 command bytes of a frame.
    pub fn to_bytes(&self) -> [u8; COMMAND_LEN] {
        match *self {
            Self::Hue(hue) => payload(ZONE_PREFIX, 0x01, [hue; 4]),
            Self::Saturation(value) => payload(ZONE_PREFIX, 0x02, [value, 0, 0, 0]),
            Self::Brightness(value) => payload(ZONE_PREFIX, 0x03, [value; 4]),
            Self::Special(mode) => payload(ZONE_PREFIX, 0x04, [mode.code(), 0, 0, 0]),
            Self::WarmWhite(value) => payload(ZONE_PREFIX, 0x05, [value, 0, 0, 0]),
            Self::Disco(mode) => payload(ZONE_PREFIX, 0x06, [mode, 0, 0, 0]),
            Self::Link => payload(LINK_PREFIX, 0x00, [0; 4]),
            Self::Unlink => payload(UNLINK_PREFIX, 0x00, [0; 4]),
            Self::Lamp(lamp) => lamp.to_bytes(),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hue(_) => "hue",
            Self::WarmWhite(_) => "warm_white",
            Self::Saturation(_) => "saturation",
            Self::Brightness(_) => "brightness",
            Self::Special(mode) => mode.as_str(),
            Self::Disco(_) => "disco",
            Self::Link => "link",
            Self::Unlink => "unlink",
            Self::Lamp(lamp) => lamp.name(),
        }
    }
}

fn payload(prefix: [u8; 4], sub: u8, params: [u8; 4]) -> [u8; COMMAND_LEN] {
    let mut bytes = [0u8; COMMAND_LEN];
    bytes[..4].copy_from_slice(&prefix);
    bytes[4] = sub;
    bytes[5..].copy_from_slice(&params);
    bytes
}

/// Switch and animation-speed commands for zone bulbs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialMode {
    On,
    Off,
    Night,
    SpeedUp,
    SpeedDown,
}

impl SpecialMode {
    /// Parse a mode token (`on`, `off`, `night`, `speedup`, `speeddown`).
    ///
    /// Returns `None` for anything else; callers drop unknown tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "night" => Some(Self::Night),
            "speedup" => Some(Self::SpeedUp),
            "speeddown" => Some(Self::SpeedDown),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Night => "night",
            Self::SpeedUp => "speedup",
            Self::SpeedDown => "speeddown",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::On => 0x01,
            Self::Off => 0x02,
            Self::SpeedUp => 0x03,
            Self::SpeedDown => 0x04,
            Self::Night => 0x05,
        }
    }
}

/// Commands for the lamp built into the iBox1 bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LampCommand {
    On,
    Off,
    SpeedUp,
    SpeedDown,
    White,
    Disco(u8),
    Hue(u8),
    Brightness(u8),
}

impl LampCommand {
    /// Parse a mode token. `value` is only used by `disco`, `color` and `intensity`.
    pub fn from_token(mode: &str, value: u8) -> Option<Self> {
        match mode {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "speedup" => Some(Self::SpeedUp),
            "speeddown" => Some(Self::SpeedDown),
            "white" => Some(Self::White),
            "disco" => Some(Self::Disco(value)),
            "color" => Some(Self::Hue(value)),
            "intensity" => Some(Self::Brightness(value)),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; COMMAND_LEN] {
        match self {
            Self::SpeedDown => payload(LAMP_PREFIX, 0x03, [0x01, 0, 0, 0]),
            Self::SpeedUp => payload(LAMP_PREFIX, 0x03, [0x02, 0, 0, 0]),
            Self::On => payload(LAMP_PREFIX, 0x03, [0x03, 0, 0, 0]),
            Self::Off => payload(LAMP_PREFIX, 0x03, [0x04, 0, 0, 0]),
            Self::White => payload(LAMP_PREFIX, 0x03, [0x05, 0, 0, 0]),
            Self::Disco(mode) => payload(LAMP_PREFIX, 0x04, [mode, 0, 0, 0]),
            Self::Hue(hue) => payload(LAMP_PREFIX, 0x01, [hue; 4]),
            Self::Brightness(value) => payload(LAMP_PREFIX, 0x02, [value, 0, 0, 0]),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::On => "lamp_on",
            Self::Off => "lamp_off",
            Self::SpeedUp => "lamp_speedup",
            Self::SpeedDown => "lamp_speeddown",
            Self::White => "lamp_white",
            Self::Disco(_) => "lamp_disco",
            Self::Hue(_) => "lamp_color",
            Self::Brightness(_) => "lamp_intensity",
        }
    }
}

impl From<LampCommand> for Command {
    fn from(lamp: LampCommand) -> Self {
        Self::Lamp(lamp)
    }
}
