/// miHoYo BBS account that posts the Honkai: Star Rail special-program announcements.
pub const AUTHOR_UID: u64 = 288909600;

/// Command names that select Honkai: Star Rail.
pub const ALIASES: [&str; 3] = ["srcode", "铁道兑换码", "星穹铁道兑换码"];
