use std::fmt;

/// One option occurrence found in argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassedOption {
    name: String,
    is_long: bool,
    value: Option<String>,
    value_in_option: bool,
    consumed: bool,
    position: usize,
    value_position: Option<usize>,
}

impl PassedOption {
    fn new(name: impl Into<String>, is_long: bool, position: usize) -> Self {
        Self {
            name: name.into(),
            is_long,
            value: None,
            value_in_option: false,
            consumed: false,
            position,
            value_position: None,
        }
    }

    /// Option name without hyphens. Short options are always one character.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_long(&self) -> bool {
        self.is_long
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the value was attached with `=` in the option's own token.
    pub fn value_in_option(&self) -> bool {
        self.value_in_option
    }

    /// Whether a lookup has already returned this occurrence.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Index of the option's token in argv (program name excluded).
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn short_name(&self) -> Option<char> {
        if self.is_long {
            return None;
        }
        self.name.chars().next()
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }

    /// Take back a value that was guessed from the following token.
    ///
    /// Inline values are never detached.
    pub(crate) fn detach_value(&mut self) -> Option<(usize, String)> {
        if self.value_in_option {
            return None;
        }
        let position = self.value_position.take()?;
        self.value.take().map(|value| (position, value))
    }
}

impl fmt::Display for PassedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_long {
            write!(f, "--{}", self.name)
        } else {
            write!(f, "-{}", self.name)
        }
    }
}

/// Passed options and positional arguments, in argv order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub(crate) passed: Vec<PassedOption>,
    positionals: Vec<String>,
    positional_positions: Vec<usize>,
}

impl Tokens {
    pub fn passed_options(&self) -> &[PassedOption] {
        &self.passed
    }

    pub fn positional_arguments(&self) -> &[String] {
        &self.positionals
    }

    fn push_positional(&mut self, position: usize, arg: String) {
        self.positionals.push(arg);
        self.positional_positions.push(position);
    }

    /// Insert a positional argument at its original argv position.
    pub(crate) fn reinsert_positional(&mut self, position: usize, arg: String) {
        let at = self
            .positional_positions
            .partition_point(|&p| p < position);
        self.positionals.insert(at, arg);
        self.positional_positions.insert(at, position);
    }

    fn push_short_cluster(&mut self, position: usize, arg: String) {
        let cluster = &arg[1..];
        let (names, value) = match cluster.split_once('=') {
            Some((names, value)) => (names, Some(value)),
            None => (cluster, None),
        };

        // `-` and `-=value` name no option.
        if names.is_empty() {
            self.push_positional(position, arg);
            return;
        }

        for c in names.chars() {
            self.passed.push(PassedOption::new(c, false, position));
        }
        if let Some(value) = value {
            self.attach_inline(position, value);
        }
    }

    fn push_long(&mut self, position: usize, arg: &str) {
        let body = &arg[2..];
        match body.split_once('=') {
            Some((name, value)) => {
                self.passed.push(PassedOption::new(name, true, position));
                self.attach_inline(position, value);
            }
            None => self.passed.push(PassedOption::new(body, true, position)),
        }
    }

    fn attach_inline(&mut self, position: usize, value: &str) {
        if let Some(last) = self.passed.last_mut() {
            last.value = Some(value.to_string());
            last.value_in_option = true;
            last.value_position = Some(position);
        }
    }

    fn push_bare(&mut self, position: usize, arg: String) {
        if let Some(last) = self.passed.last_mut().filter(|last| last.value.is_none()) {
            last.value = Some(arg);
            last.value_position = Some(position);
            return;
        }
        self.push_positional(position, arg);
    }
}

/// Split `args` (program name excluded) into passed options and positionals.
///
/// No descriptors are consulted: a bare token after a valueless option is
/// always taken as that option's value, and registration may later hand it
/// back as a positional argument.
pub fn tokenize<I, S>(args: I) -> Tokens
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = Tokens::default();
    let mut args = args.into_iter().map(Into::into).enumerate();

    while let Some((position, arg)) = args.next() {
        let hyphens = arg.bytes().take_while(|&b| b == b'-').count();
        match hyphens {
            1 => tokens.push_short_cluster(position, arg),
            2 if arg.len() == 2 => {
                tracing::debug!(position, "option parsing terminated by '--'");
                for (position, arg) in args.by_ref() {
                    tokens.push_positional(position, arg);
                }
                break;
            }
            2 => tokens.push_long(position, &arg),
            _ => tokens.push_bare(position, arg),
        }
    }

    tracing::debug!(
        options = tokens.passed.len(),
        positionals = tokens.positionals.len(),
        "tokenized arguments"
    );
    tokens
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    fn names(tokens: &super::Tokens) -> Vec<String> {
        tokens.passed_options().iter().map(|o| o.to_string()).collect()
    }

    #[test]
    fn short_cluster_yields_one_option_per_character() {
        let tokens = tokenize(["-abc"]);
        assert_eq!(names(&tokens), ["-a", "-b", "-c"]);
        assert!(tokens.passed_options().iter().all(|o| o.value().is_none()));
        assert!(tokens.positional_arguments().is_empty());
    }

    #[test]
    fn inline_value_attaches_to_last_short_in_cluster() {
        let tokens = tokenize(["-abo=out.txt"]);
        let passed = tokens.passed_options();
        assert_eq!(passed.len(), 3);
        assert_eq!(passed[0].value(), None);
        assert_eq!(passed[1].value(), None);
        assert_eq!(passed[2].name(), "o");
        assert_eq!(passed[2].value(), Some("out.txt"));
        assert!(passed[2].value_in_option());
    }

    #[test]
    fn inline_values_for_long_and_short() {
        for arg in ["--opt=val", "-o=val"] {
            let tokens = tokenize([arg]);
            let [opt] = tokens.passed_options() else {
                panic!("expected a single option for {arg}");
            };
            assert_eq!(opt.value(), Some("val"));
            assert!(opt.value_in_option());
        }
    }

    #[test]
    fn next_token_becomes_value() {
        let tokens = tokenize(["--opt", "val", "rest"]);
        let [opt] = tokens.passed_options() else {
            panic!("expected a single option");
        };
        assert_eq!(opt.name(), "opt");
        assert!(opt.is_long());
        assert_eq!(opt.value(), Some("val"));
        assert!(!opt.value_in_option());
        assert_eq!(tokens.positional_arguments(), ["rest"]);
    }

    #[test]
    fn empty_inline_value_is_present() {
        let tokens = tokenize(["--opt=", "next"]);
        assert_eq!(tokens.passed_options()[0].value(), Some(""));
        assert_eq!(tokens.positional_arguments(), ["next"]);
    }

    #[test]
    fn value_splits_at_first_equals() {
        let tokens = tokenize(["--define=KEY=1"]);
        let opt = &tokens.passed_options()[0];
        assert_eq!(opt.name(), "define");
        assert_eq!(opt.value(), Some("KEY=1"));
    }

    #[test]
    fn terminator_makes_the_rest_positional() {
        let tokens = tokenize(["-a", "--", "-x", "--y", "z", "--"]);
        assert_eq!(names(&tokens), ["-a"]);
        assert_eq!(tokens.passed_options()[0].value(), None);
        assert_eq!(tokens.positional_arguments(), ["-x", "--y", "z", "--"]);
    }

    #[test]
    fn three_hyphens_are_not_an_option() {
        let tokens = tokenize(["---x"]);
        assert!(tokens.passed_options().is_empty());
        assert_eq!(tokens.positional_arguments(), ["---x"]);

        let tokens = tokenize(["--opt", "---x"]);
        assert_eq!(tokens.passed_options()[0].value(), Some("---x"));
    }

    #[test]
    fn degenerate_short_tokens_are_positional() {
        let tokens = tokenize(["-a", "-=x", "-"]);
        assert_eq!(names(&tokens), ["-a"]);
        assert_eq!(tokens.passed_options()[0].value(), None);
        assert_eq!(tokens.positional_arguments(), ["-=x", "-"]);
    }

    #[test]
    fn records_argv_positions() {
        let tokens = tokenize(["file", "-v", "--name", "x"]);
        let passed = tokens.passed_options();
        assert_eq!(passed[0].position(), 1);
        assert_eq!(passed[1].position(), 2);
        assert_eq!(passed[1].value(), Some("x"));
        assert_eq!(tokens.positional_arguments(), ["file"]);
    }
}
