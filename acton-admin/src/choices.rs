//! Choices for selects, radio groups and checkbox groups

/// A single selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value attribute
    pub value: String,
    /// Display text
    pub label: String,
    /// Whether this option is disabled
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Create a disabled option (useful for placeholder)
    #[must_use]
    pub fn disabled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: true,
        }
    }
}

/// An option or a labelled group of options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Single option
    Option(SelectOption),
    /// Named group (`<optgroup>` in selects)
    Group {
        /// Group label
        label: String,
        /// Options inside the group
        options: Vec<SelectOption>,
    },
}

impl Choice {
    /// Single option shorthand
    #[must_use]
    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Option(SelectOption::new(value, label))
    }

    /// Group shorthand
    #[must_use]
    pub fn group<I, V, L>(label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        Self::Group {
            label: label.into(),
            options: options
                .into_iter()
                .map(|(v, l)| SelectOption::new(v, l))
                .collect(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for Choice {
    fn from((value, label): (V, L)) -> Self {
        Self::option(value, label)
    }
}

impl From<SelectOption> for Choice {
    fn from(option: SelectOption) -> Self {
        Self::Option(option)
    }
}

/// Build a choice list from `(value, label)` pairs
#[must_use]
pub fn choices<I, V, L>(pairs: I) -> Vec<Choice>
where
    I: IntoIterator<Item = (V, L)>,
    V: Into<String>,
    L: Into<String>,
{
    pairs.into_iter().map(Choice::from).collect()
}

/// Iterate over every option, descending into groups
pub fn flat_options<'a>(
    choices: impl IntoIterator<Item = &'a Choice>,
) -> impl Iterator<Item = &'a SelectOption> {
    choices.into_iter().flat_map(|choice| match choice {
        Choice::Option(option) => std::slice::from_ref(option).iter(),
        Choice::Group { options, .. } => options.iter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_options_descends_into_groups() {
        let list = vec![
            Choice::option("a", "A"),
            Choice::group("Group", [("b", "B"), ("c", "C")]),
            Choice::option("d", "D"),
        ];
        let values: Vec<&str> = flat_options(&list).map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_choices_from_pairs() {
        let list = choices([("1", "One"), ("2", "Two")]);
        assert_eq!(list[1], Choice::option("2", "Two"));
    }
}
