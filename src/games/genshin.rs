/// miHoYo BBS account that posts the Genshin Impact special-program announcements.
pub const AUTHOR_UID: u64 = 75276550;

/// Command names that select Genshin Impact.
pub const ALIASES: [&str; 2] = ["gscode", "原神兑换码"];
