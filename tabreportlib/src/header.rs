//! Multi-line header construction.
//!
//! Column names are split on a token separator (`_` by default) and each
//! fragment goes on its own header line. Shorter columns are padded at the
//! top, so the last fragment of every column lands on the final header line:
//!
//! ```text
//!        d
//!     b  e
//!  a  c  f
//! ```

/// Default character column names are split on.
pub const DEFAULT_TOKEN_SEPARATOR: char = '_';

/// Split each column name into its tokens.
///
/// A name without the separator yields a single token. Splitting is literal,
/// so `a__b` yields `["a", "", "b"]`.
pub fn tokenize<S: AsRef<str>>(columns: &[S], separator: char) -> Vec<Vec<String>> {
    columns
        .iter()
        .map(|name| name.as_ref().split(separator).map(str::to_string).collect())
        .collect()
}

/// Left-pad every token list with empty tokens to the longest list's length.
///
/// Idempotent: an already normalized matrix comes back unchanged.
pub fn normalize(token_lists: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let max_len = token_lists.iter().map(Vec::len).max().unwrap_or(0);

    token_lists
        .into_iter()
        .map(|tokens| {
            if tokens.len() == max_len {
                return tokens;
            }
            let mut padded = vec![String::new(); max_len - tokens.len()];
            padded.extend(tokens);
            padded
        })
        .collect()
}

/// Normalized header tokens for a report, one token list per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTokens {
    columns: Vec<Vec<String>>,
}

impl HeaderTokens {
    /// Tokenize and normalize the given column names.
    pub fn from_columns<S: AsRef<str>>(columns: &[S], separator: char) -> Self {
        HeaderTokens {
            columns: normalize(tokenize(columns, separator)),
        }
    }

    /// Number of header lines (equal for all columns).
    pub fn line_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Tokens on one header line, in column order.
    pub fn line(&self, index: usize) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(move |tokens| tokens.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Widest token per column, in characters.
    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|t| t.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owned(lists: &[&[&str]]) -> Vec<Vec<String>> {
        lists
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_tokenize_splits_on_separator() {
        let tokens = tokenize(&["a", "b_c", "d_e_f"], '_');
        assert_eq!(tokens, owned(&[&["a"], &["b", "c"], &["d", "e", "f"]]));
    }

    #[test]
    fn test_tokenize_custom_separator() {
        let tokens = tokenize(&["created.at", "id"], '.');
        assert_eq!(tokens, owned(&[&["created", "at"], &["id"]]));
    }

    #[test]
    fn test_tokenize_keeps_empty_fragments() {
        let tokens = tokenize(&["a__b"], '_');
        assert_eq!(tokens, owned(&[&["a", "", "b"]]));
    }

    #[test]
    fn test_normalize_left_pads() {
        let normalized = normalize(owned(&[&["a"], &["b", "c"], &["d", "e", "f"]]));
        assert_eq!(
            normalized,
            owned(&[&["", "", "a"], &["", "b", "c"], &["d", "e", "f"]])
        );
    }

    #[test]
    fn test_normalize_single_token_columns_is_noop() {
        let lists = owned(&[&["id"], &["name"]]);
        assert_eq!(normalize(lists.clone()), lists);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_header_tokens_lines_and_widths() {
        let headers = HeaderTokens::from_columns(&["id", "the_timestamp"], '_');
        assert_eq!(headers.line_count(), 2);
        assert_eq!(headers.column_count(), 2);
        assert_eq!(headers.line(0).collect::<Vec<_>>(), vec!["", "the"]);
        assert_eq!(headers.line(1).collect::<Vec<_>>(), vec!["id", "timestamp"]);
        assert_eq!(headers.widths(), vec![2, 9]);
    }

    #[test]
    fn test_header_tokens_no_columns() {
        let headers = HeaderTokens::from_columns::<&str>(&[], '_');
        assert_eq!(headers.line_count(), 0);
        assert!(headers.widths().is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(names in prop::collection::vec("[a-z]{0,4}(_[a-z]{0,4}){0,3}", 0..8)) {
            let once = normalize(tokenize(&names, '_'));
            let twice = normalize(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalized_lists_share_length_and_keep_last_token(names in prop::collection::vec("[a-z]{1,4}(_[a-z]{1,4}){0,3}", 1..8)) {
            let raw = tokenize(&names, '_');
            let normalized = normalize(raw.clone());
            let max_len = raw.iter().map(Vec::len).max().unwrap();
            for (before, after) in raw.iter().zip(&normalized) {
                prop_assert_eq!(after.len(), max_len);
                prop_assert_eq!(before.last(), after.last());
                prop_assert_eq!(&after[max_len - before.len()..], before.as_slice());
            }
        }
    }
}
