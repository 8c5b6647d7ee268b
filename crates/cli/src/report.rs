use indexmap::IndexMap;
use optparse::{OptionId, OptionParser, PassedOption, Tokens};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassedReport {
    pub option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub inline: bool,
}

impl From<&PassedOption> for PassedReport {
    fn from(option: &PassedOption) -> Self {
        Self {
            option: option.to_string(),
            value: option.value().map(str::to_owned),
            inline: option.value_in_option(),
        }
    }
}

/// Raw tokenization, before any option is declared.
#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub options: Vec<PassedReport>,
    pub positionals: Vec<String>,
}

impl TokenReport {
    pub fn new(tokens: &Tokens) -> Self {
        Self {
            options: tokens.passed_options().iter().map(PassedReport::from).collect(),
            positionals: tokens.positional_arguments().to_vec(),
        }
    }

    pub fn print(&self) {
        for option in &self.options {
            match (&option.value, option.inline) {
                (Some(value), true) => println!("option {}={value}", option.option),
                (Some(value), false) => println!("option {} {value}", option.option),
                (None, _) => println!("option {}", option.option),
            }
        }
        for arg in &self.positionals {
            println!("positional {arg}");
        }
    }
}

/// Values matched per declared option, keyed by long name in registration order.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub matches: IndexMap<String, Vec<Option<String>>>,
    pub positionals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<String>,
}

impl CheckReport {
    /// Drain every declared option from `parser`.
    pub fn collect(parser: &mut OptionParser, ids: &[OptionId]) -> Self {
        let mut report = Self {
            unknown: parser.first_unknown().map(ToString::to_string),
            ..Default::default()
        };
        for &id in ids {
            let Some(name) = parser.descriptor(id).map(|d| d.long_name().to_string()) else {
                continue;
            };
            let values = parser.values(id);
            if !values.is_empty() {
                report.matches.entry(name).or_default().extend(values);
            }
        }
        report.positionals = parser.positional_arguments().to_vec();
        report
    }

    pub fn print(&self) {
        for (name, values) in &self.matches {
            for value in values {
                match value {
                    Some(value) => println!("option --{name} {value}"),
                    None => println!("option --{name}"),
                }
            }
        }
        for arg in &self.positionals {
            println!("positional {arg}");
        }
        if let Some(unknown) = &self.unknown {
            println!("unknown {unknown}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optparse::{Descriptor, tokenize};

    #[test]
    fn token_report_keeps_value_forms() {
        let report = TokenReport::new(&tokenize(["-ab=1", "--out", "x", "file"]));
        let options: Vec<(&str, Option<&str>, bool)> = report
            .options
            .iter()
            .map(|o| (o.option.as_str(), o.value.as_deref(), o.inline))
            .collect();
        assert_eq!(
            options,
            [
                ("-a", None, false),
                ("-b", Some("1"), true),
                ("--out", Some("x"), false)
            ]
        );
        assert_eq!(report.positionals, ["file"]);
    }

    #[test]
    fn check_report_groups_values_by_long_name() {
        let mut parser = OptionParser::new(["-v", "--verbose", "-o", "a", "in", "-x"]);
        let ids = vec![
            parser
                .describe(Descriptor::new("verbose", "").short('v'))
                .unwrap(),
            parser
                .describe(Descriptor::new("output", "").short('o').takes_value())
                .unwrap(),
        ];
        let report = CheckReport::collect(&mut parser, &ids);

        let keys: Vec<&str> = report.matches.keys().map(String::as_str).collect();
        assert_eq!(keys, ["verbose", "output"]);
        assert_eq!(report.matches["verbose"], [None::<String>, None]);
        assert_eq!(report.matches["output"], [Some("a".to_string())]);
        assert_eq!(report.positionals, ["in"]);
        assert_eq!(report.unknown.as_deref(), Some("-x"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["matches"]["output"][0], "a");
    }
}
