/// Usage errors detected while reconciling passed options with descriptors.
///
/// `option` is the option as the user wrote it (`-n` or `--name`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// A valueless option was given a value with `=`.
    #[error("option '{option}' doesn't take a value but one was passed with '='")]
    ValuePolicyConflict { option: String },

    #[error("option '{option}' requires a value")]
    MissingRequiredValue { option: String },

    #[error("invalid option '{option}'")]
    UnknownOption { option: String },
}

impl OptionError {
    /// The offending option, as passed on the command line.
    pub fn option(&self) -> &str {
        match self {
            Self::ValuePolicyConflict { option }
            | Self::MissingRequiredValue { option }
            | Self::UnknownOption { option } => option.as_str(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptionError>;
