use rand::Rng;

/// Fixed label color palette.
pub const PALETTE: [&str; 6] = [
    "#60A5FA", "#A78BFA", "#34D399", "#FBBF24", "#F87171", "#FB7185",
];

/// Pick a palette color uniformly at random.
pub fn pick(rng: &mut impl Rng) -> &'static str {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}
