use serde::{Deserialize, Serialize};

/// Per-variable information beyond the stattype.
///
/// For categorical variables, `options` lists the labels of the domain in
/// index order. A `Datum::Categorical(ix)` refers to `options[ix]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ColumnMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ColumnMetadata {
    /// Metadata for a categorical variable with labeled options
    pub fn categorical<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }

    /// Metadata for a categorical variable with `k` unlabeled options.
    /// Option `ix` is labeled by its index.
    pub fn with_k(k: usize) -> Self {
        Self::categorical((0..k).map(|ix| ix.to_string()))
    }

    /// The number of categorical options, if any are defined
    pub fn k(&self) -> Option<usize> {
        self.options.as_ref().map(|options| options.len())
    }

    /// The index of the option labeled `label`
    ///
    /// # Example
    ///
    /// ```
    /// # use skein_stats::ColumnMetadata;
    /// let md = ColumnMetadata::categorical(["red", "green", "blue"]);
    ///
    /// assert_eq!(md.index_of("green"), Some(1));
    /// assert_eq!(md.index_of("mauve"), None);
    /// assert_eq!(md.label(2), Some("blue"));
    /// ```
    pub fn index_of(&self, label: &str) -> Option<u8> {
        self.options
            .as_ref()?
            .iter()
            .position(|option| option == label)
            .and_then(|ix| u8::try_from(ix).ok())
    }

    /// The label of option `ix`
    pub fn label(&self, ix: u8) -> Option<&str> {
        self.options
            .as_ref()?
            .get(usize::from(ix))
            .map(|option| option.as_str())
    }
}
