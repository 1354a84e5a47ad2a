//! Search Logic
//!
//! Prefix matching for type-to-search and the scan primitives used by the
//! navigation keys. All functions work on plain label slices so they can be
//! tested without building menus.

/// Case-insensitive "starts with" match of a row label against a prefix
///
/// # Examples
/// ```
/// use cascade_menu::logic::search::prefix_matches;
///
/// assert!(prefix_matches("ap", "Apple"));
/// assert!(prefix_matches("", "anything"));
/// assert!(!prefix_matches("ban", "Apple"));
/// ```
pub fn prefix_matches(prefix: &str, label: &str) -> bool {
    if prefix.is_empty() {
        return true; // Empty filter matches everything
    }

    let mut label_chars = label.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| label_chars.next() == Some(p))
}

/// Scan from `start` towards the end for the first matching label
///
/// `skip` is the index of the currently focused row, which never counts as a match.
pub fn find_forward<S: AsRef<str>>(
    labels: &[S],
    start: usize,
    skip: Option<usize>,
    prefix: &str,
) -> Option<usize> {
    (start..labels.len())
        .filter(|i| Some(*i) != skip)
        .find(|i| prefix_matches(prefix, labels[*i].as_ref()))
}

/// Scan from `start` towards index 0 for the first matching label
///
/// A `start` past the end is clamped to the last index.
pub fn find_backward<S: AsRef<str>>(
    labels: &[S],
    start: usize,
    skip: Option<usize>,
    prefix: &str,
) -> Option<usize> {
    if labels.is_empty() {
        return None;
    }
    let start = start.min(labels.len() - 1);
    (0..=start)
        .rev()
        .filter(|i| Some(*i) != skip)
        .find(|i| prefix_matches(prefix, labels[*i].as_ref()))
}

/// Forward scan from `from`, then again from the first row
///
/// # Examples
/// ```
/// use cascade_menu::logic::search::find_forward_wrapping;
///
/// let rows = ["Apple", "Banana", "Apricot"];
/// // Nothing focused yet: first match
/// assert_eq!(find_forward_wrapping(&rows, None, None, "ap"), Some(0));
/// // Focus on Apple: Banana is skipped
/// assert_eq!(find_forward_wrapping(&rows, Some(0), Some(0), "ap"), Some(2));
/// // Focus on Apricot: wraps back to Apple
/// assert_eq!(find_forward_wrapping(&rows, Some(2), Some(2), "ap"), Some(0));
/// ```
pub fn find_forward_wrapping<S: AsRef<str>>(
    labels: &[S],
    from: Option<usize>,
    skip: Option<usize>,
    prefix: &str,
) -> Option<usize> {
    from.and_then(|i| find_forward(labels, i, skip, prefix))
        .or_else(|| find_forward(labels, 0, skip, prefix))
}

/// Backward scan from `from`, then again from the last row
pub fn find_backward_wrapping<S: AsRef<str>>(
    labels: &[S],
    from: Option<usize>,
    skip: Option<usize>,
    prefix: &str,
) -> Option<usize> {
    from.and_then(|i| find_backward(labels, i, skip, prefix))
        .or_else(|| find_backward(labels, labels.len().saturating_sub(1), skip, prefix))
}
