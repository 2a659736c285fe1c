// ----------------------------------------------------------------------------
// Precomputed hypotenuse lengths per bintree level, read-only after init.
//
// A level-0 triangle's hypotenuse is the square domain's diagonal. Each
// split produces children whose hypotenuse is one of the parent's legs,
// which for a right isoceles triangle is the parent's hypotenuse divided by
// sqrt(2). So lengths fall off geometrically with level, independent of
// where in the tree a triangle sits.
// ----------------------------------------------------------------------------
const SQRT_2: f32 = std::f32::consts::SQRT_2;
// ----------------------------------------------------------------------------
pub struct HypotenuseLengthTable {
    lengths: Vec<f32>,
}
// ----------------------------------------------------------------------------
impl HypotenuseLengthTable {
    // ------------------------------------------------------------------------
    pub fn build(size: u32, max_levels: u8) -> Self {
        let mut lengths = Vec::with_capacity(max_levels as usize + 1);
        let mut len = size as f32 * SQRT_2;
        for _ in 0..=max_levels {
            lengths.push(len);
            len /= SQRT_2;
        }
        Self { lengths }
    }
    // ------------------------------------------------------------------------
    pub fn get(&self, level: u8) -> f32 {
        self.lengths[level as usize]
    }
    // ------------------------------------------------------------------------
}
