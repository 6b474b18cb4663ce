use std::fmt;
use std::io;

/// Level generation failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// No target position clear of the player was found
    TargetPlacement { attempts: u32 },
    /// A wall could not be placed within the attempt budget
    WallPlacement {
        placed: u32,
        requested: u32,
        attempts: u32,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetPlacement { attempts } => {
                write!(f, "could not place target clear of player after {attempts} attempts")
            }
            Self::WallPlacement {
                placed,
                requested,
                attempts,
            } => write!(
                f,
                "could not place wall {} of {requested} after {attempts} attempts",
                placed + 1
            ),
        }
    }
}

impl std::error::Error for LevelError {}

/// Configuration load or validation failure
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read settings: {err}"),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Failure to start a session
#[derive(Debug)]
pub enum GameError {
    Settings(SettingsError),
    Level(LevelError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(err) => write!(f, "{err}"),
            Self::Level(err) => write!(f, "level generation failed: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(err) => Some(err),
            Self::Level(err) => Some(err),
        }
    }
}

impl From<SettingsError> for GameError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

impl From<LevelError> for GameError {
    fn from(err: LevelError) -> Self {
        Self::Level(err)
    }
}
