use crate::descriptor::Descriptor;

/// Spacing between the longest long name and the short-name column.
const COLUMN_GAP: usize = 5;

/// Render the "Valid options" listing with the short-name column aligned on
/// the longest long name.
pub(crate) fn render(descriptors: &[Descriptor]) -> String {
    let longest = descriptors
        .iter()
        .map(|d| d.long_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Valid options:\n");
    for d in descriptors {
        let gap = longest + COLUMN_GAP - d.long_name().chars().count();
        let (dash, short) = match d.short_name() {
            Some(short) => ('-', short),
            None => (' ', ' '),
        };
        let line = format!(
            "  --{}{:>gap$}{}     {}",
            d.long_name(),
            dash,
            short,
            d.description(),
            gap = gap
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::Descriptor;

    #[test]
    fn aligns_short_names_and_descriptions() {
        let text = render(&[
            Descriptor::new("verbose", "Verbose output").short('v'),
            Descriptor::new("output", "Output file").takes_value(),
            Descriptor::new("n", "Count").short('n'),
        ]);
        let expected = concat!(
            "Valid options:\n",
            "  --verbose    -v     Verbose output\n",
            "  --output            Output file\n",
            "  --n          -n     Count\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_registry_lists_only_the_heading() {
        assert_eq!(render(&[]), "Valid options:\n");
    }

    #[test]
    fn missing_description_leaves_no_trailing_space() {
        let text = render(&[Descriptor::new("quiet", "")]);
        assert_eq!(text, "Valid options:\n  --quiet\n");
    }
}
