use crate::tokenizer::PassedOption;

/// Handle returned by [`crate::OptionParser::describe`].
///
/// Handles are registration indices: the first described option is `0`, and
/// indices are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(pub(crate) usize);

impl OptionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A supported option: long name, optional one-character alias, help text
/// and value policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    long_name: String,
    short_name: Option<char>,
    description: String,
    requires_value: bool,
}

impl Descriptor {
    /// Declare a valueless option with no short alias.
    pub fn new(long_name: impl Into<String>, description: impl Into<String>) -> Self {
        let long_name = long_name.into();
        debug_assert!(!long_name.is_empty(), "long option name must not be empty");
        Self {
            long_name,
            short_name: None,
            description: description.into(),
            requires_value: false,
        }
    }

    pub fn short(mut self, short_name: char) -> Self {
        self.short_name = Some(short_name);
        self
    }

    /// Require a value (`--name=value`, `-n=value` or `--name value`).
    pub fn takes_value(self) -> Self {
        self.requires_value(true)
    }

    pub fn requires_value(mut self, requires_value: bool) -> Self {
        self.requires_value = requires_value;
        self
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value_required(&self) -> bool {
        self.requires_value
    }

    /// Long occurrences match on the long name, short ones on the alias.
    pub fn matches(&self, option: &PassedOption) -> bool {
        if option.is_long() {
            option.name() == self.long_name
        } else {
            self.short_name.is_some() && option.short_name() == self.short_name
        }
    }

    pub(crate) fn overlaps(&self, other: &Descriptor) -> bool {
        self.long_name == other.long_name
            || (self.short_name.is_some() && self.short_name == other.short_name)
    }
}
