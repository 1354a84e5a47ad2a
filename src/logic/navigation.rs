//! Root menu cycling logic
//!
//! Pure functions for Tab / Shift+Tab cycling across the root menus with
//! wrapping behavior.

/// Calculate the next index with wrapping
///
/// If nothing is current, the first index is chosen.
///
/// # Examples
/// ```
/// use cascade_menu::logic::navigation::next_index;
///
/// assert_eq!(next_index(None, 0), None);
/// assert_eq!(next_index(None, 3), Some(0));
/// assert_eq!(next_index(Some(1), 3), Some(2));
/// assert_eq!(next_index(Some(2), 3), Some(0));
/// ```
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= len - 1 => 0, // Wrap to start
        Some(i) => i + 1,
        None => 0,
    })
}

/// Calculate the previous index with wrapping
///
/// If nothing is current, the last index is chosen.
///
/// # Examples
/// ```
/// use cascade_menu::logic::navigation::prev_index;
///
/// assert_eq!(prev_index(None, 0), None);
/// assert_eq!(prev_index(None, 3), Some(2));
/// assert_eq!(prev_index(Some(1), 3), Some(0));
/// assert_eq!(prev_index(Some(0), 3), Some(2));
/// ```
pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => len - 1, // Wrap to end
        Some(i) => i.min(len) - 1,
    })
}

/// Pick the root menu that receives input focus on Tab / Shift+Tab
///
/// Tab walks towards the first slot, Shift+Tab towards the last, both
/// wrapping. `current` is the position of the source menu's root among the
/// populated roots; when it is not one of them Tab lands on the last root
/// and Shift+Tab on the first.
///
/// # Examples
/// ```
/// use cascade_menu::logic::navigation::cycle_root;
///
/// let roots = ["A", "B", "C"];
/// assert_eq!(cycle_root(&roots, Some(1), false), Some(&"A"));
/// assert_eq!(cycle_root(&roots, Some(1), true), Some(&"C"));
/// assert_eq!(cycle_root(&roots, Some(0), false), Some(&"C"));
/// ```
pub fn cycle_root<T>(roots: &[T], current: Option<usize>, shift: bool) -> Option<&T> {
    let index = if shift {
        next_index(current, roots.len())
    } else {
        prev_index(current, roots.len())
    };
    index.and_then(|i| roots.get(i))
}
