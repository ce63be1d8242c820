use crate::models::User;

/// Adds XP to the user and resolves any level-ups.
///
/// Both `xp` and `total_xp` grow by `amount`; the level-up check is a loop
/// so a single large award can cascade through several levels. Each level-up
/// subtracts the current threshold from `xp` and raises the threshold by
/// `xp_required / sqrt(level)`, floored at 1 XP so requirements keep rising
/// even at high levels.
///
/// Returns the number of levels gained, and leaves the user satisfying
/// `0 <= xp < xp_required`.
pub fn add_xp(user: &mut User, amount: f64) -> u32 {
    user.xp += amount;
    user.total_xp += amount;
    let mut level_ups = 0;
    while user.xp >= user.xp_required {
        user.xp -= user.xp_required;
        let growth = (user.xp_required / (user.level as f64).sqrt()).max(1.0);
        user.xp_required = (user.xp_required + growth).round().max(1.0);
        user.level += 1;
        level_ups += 1;
    }
    level_ups
}
