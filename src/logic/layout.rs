//! Layout calculation logic
//!
//! Pure functions deciding where a submenu window opens relative to its
//! parent. This is what makes a cascade flip from growing rightwards to
//! growing leftwards when it reaches the screen edge.

use super::cascade::Direction;

/// Where a submenu should be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmenuPlacement {
    /// Left edge of the submenu in screen cells
    pub x: i32,
    /// Side of the parent the submenu opened on
    pub direction: Direction,
}

/// Calculate the X position of a submenu
///
/// # Arguments
/// * `parent_x` - Left edge of the parent menu
/// * `parent_width` - Width of the parent menu
/// * `width` - Width of the submenu
/// * `screen_width` - Usable screen width
/// * `preferred` - Direction the cascade is currently growing in
///
/// # Layout Strategy
/// - Keep growing in the preferred direction while the submenu fits
/// - Otherwise flip to the other side if it fits there
/// - If neither side fits, use the side with more room, clamped to the screen
///
/// # Examples
/// ```
/// use cascade_menu::logic::cascade::Direction;
/// use cascade_menu::logic::layout::place_submenu;
///
/// // Room on the right
/// let p = place_submenu(0, 20, 20, 100, Direction::Right);
/// assert_eq!((p.x, p.direction), (20, Direction::Right));
///
/// // Right edge reached: flip left
/// let p = place_submenu(70, 20, 20, 100, Direction::Right);
/// assert_eq!((p.x, p.direction), (50, Direction::Left));
/// ```
pub fn place_submenu(
    parent_x: i32,
    parent_width: u16,
    width: u16,
    screen_width: u16,
    preferred: Direction,
) -> SubmenuPlacement {
    let right_x = parent_x + i32::from(parent_width);
    let left_x = parent_x - i32::from(width);
    let fits_right = right_x + i32::from(width) <= i32::from(screen_width);
    let fits_left = left_x >= 0;

    let direction = match preferred {
        Direction::Right if fits_right => Direction::Right,
        Direction::Left if fits_left => Direction::Left,
        Direction::Right if fits_left => Direction::Left,
        Direction::Left if fits_right => Direction::Right,
        _ => {
            let room_right = i32::from(screen_width) - right_x;
            if room_right >= parent_x {
                Direction::Right
            } else {
                Direction::Left
            }
        }
    };

    let x = match direction {
        Direction::Right => right_x.min(i32::from(screen_width) - i32::from(width)).max(0),
        Direction::Left => left_x.max(0),
    };

    SubmenuPlacement { x, direction }
}
