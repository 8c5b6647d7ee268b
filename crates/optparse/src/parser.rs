use crate::descriptor::{Descriptor, OptionId};
use crate::error::{OptionError, Result};
use crate::help;
use crate::tokenizer::{PassedOption, Tokens, tokenize};

/// Tokenized arguments plus the descriptors declared against them.
#[derive(Debug, Clone, Default)]
pub struct OptionParser {
    tokens: Tokens,
    descriptors: Vec<Descriptor>,
}

impl OptionParser {
    /// Tokenize `args`. The program name must already be skipped.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokenize(args),
            descriptors: Vec::new(),
        }
    }

    /// Tokenize the current process arguments.
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    /// Register a supported option and check the passed occurrences of it
    /// against its value policy.
    ///
    /// Valueless options that picked up the following token as a value give
    /// it back to the positional arguments. An inline value on a valueless
    /// option, or a missing value on a value-taking one, is reported on
    /// stderr and returned as an error. The descriptor stays registered
    /// either way, and values already given back are not restored.
    pub fn describe(&mut self, descriptor: Descriptor) -> Result<OptionId> {
        if self.descriptors.iter().any(|d| d.overlaps(&descriptor)) {
            tracing::warn!(
                long = descriptor.long_name(),
                short = ?descriptor.short_name(),
                "option described more than once"
            );
        }

        let id = OptionId(self.descriptors.len());
        self.descriptors.push(descriptor);

        self.validate(id).inspect_err(|err| eprintln!("{err}"))?;
        Ok(id)
    }

    fn validate(&mut self, id: OptionId) -> Result<()> {
        let descriptor = &self.descriptors[id.0];
        let tokens = &mut self.tokens;

        for i in 0..tokens.passed.len() {
            let option = &mut tokens.passed[i];
            if !descriptor.matches(option) {
                continue;
            }

            match (descriptor.value_required(), option.value().is_some()) {
                (false, true) if option.value_in_option() => {
                    return Err(OptionError::ValuePolicyConflict {
                        option: option.to_string(),
                    });
                }
                (false, true) => {
                    if let Some((position, value)) = option.detach_value() {
                        tracing::debug!(
                            option = %option,
                            value = %value,
                            "moving value to positional arguments"
                        );
                        tokens.reinsert_positional(position, value);
                    }
                }
                (true, false) => {
                    return Err(OptionError::MissingRequiredValue {
                        option: option.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Return the first unconsumed occurrence of the option and mark it
    /// consumed.
    pub fn find(&mut self, id: OptionId) -> Option<&PassedOption> {
        let descriptor = self.descriptors.get(id.0)?;
        let option = self
            .tokens
            .passed
            .iter_mut()
            .find(|o| !o.is_consumed() && descriptor.matches(o))?;
        option.consume();
        Some(&*option)
    }

    /// Presence test. Consumes the occurrence it finds.
    pub fn has(&mut self, id: OptionId) -> bool {
        self.find(id).is_some()
    }

    /// Consume every remaining occurrence and return their values in order.
    pub fn values(&mut self, id: OptionId) -> Vec<Option<String>> {
        let mut values = Vec::new();
        while let Some(option) = self.find(id) {
            values.push(option.value().map(str::to_owned));
        }
        values
    }

    /// Non-option arguments in argv order, including everything after `--`.
    pub fn positional_arguments(&self) -> &[String] {
        self.tokens.positional_arguments()
    }

    pub fn passed_options(&self) -> &[PassedOption] {
        self.tokens.passed_options()
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, id: OptionId) -> Option<&Descriptor> {
        self.descriptors.get(id.0)
    }

    /// First passed option that matches no descriptor, consumed or not.
    pub fn first_unknown(&self) -> Option<&PassedOption> {
        self.tokens
            .passed_options()
            .iter()
            .find(|o| !self.descriptors.iter().any(|d| d.matches(o)))
    }

    pub fn check_unknown(&self) -> Result<()> {
        match self.first_unknown() {
            Some(option) => Err(OptionError::UnknownOption {
                option: option.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Report an undeclared option on stderr, followed by the option listing.
    ///
    /// Returns `true` when such an option was found.
    pub fn reject_unknown(&self) -> bool {
        match self.check_unknown() {
            Ok(()) => false,
            Err(err) => {
                eprint!("{}\n\n{}", capitalize(&err.to_string()), self.help());
                true
            }
        }
    }

    /// The option listing.
    pub fn help(&self) -> String {
        help::render(&self.descriptors)
    }

    pub fn print_help(&self) {
        print!("{}", self.help());
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
