use rand::Rng;
use rand::distr::Uniform;

/// Short human-friendly seed, the kind that fits in a HUD field
pub fn generate_seed() -> u32 {
    let mut rng = rand::rng();
    rng.sample(Uniform::new(0u32, 100_000_000u32).unwrap())
}

pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derives a decorrelated sub-seed for an independent noise stream
/// (wind, breathing) from the base city seed
pub fn derive_stream(seed: u32, salt: u64) -> u32 {
    splitmix64((seed as u64) ^ (salt << 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_stream_decorrelates() {
        let seed = 12345;
        assert_ne!(derive_stream(seed, 1), derive_stream(seed, 2));
        assert_ne!(derive_stream(seed, 1), seed);
    }

    #[test]
    fn test_derive_stream_is_stable() {
        assert_eq!(derive_stream(777, 3), derive_stream(777, 3));
    }
}
