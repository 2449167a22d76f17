use crate::rules::Color;


/// Starting value for a mover's running best: the worst possible score for
/// that mover.
pub fn worst_score(color: Color) -> i32 {
    return match color {
        Color::X => i32::MIN,
        Color::O => i32::MAX,
    }
}


pub fn is_better(new: i32, old: i32, color: Color) -> bool {
    return match color {
        Color::X => new > old,
        Color::O => new < old,
    }
}
