//! Integer arithmetic on IPv4 addresses and block sizes.
//!
//! Addresses are handled as their 32-bit big-endian integer value. All
//! functions here are pure and never fail.

use std::net::Ipv4Addr;

/// Add `offset` to `base`, treating the four octets as one `u32`.
///
/// Overflow policy: wrap on overflow. Carries past 255.255.255.255 are
/// dropped, so the result is `(base + offset) mod 2^32`. No bound is
/// enforced for legitimate inputs.
///
/// # Examples
/// ```
/// use poolgen::ip::arithmetic::increment_address;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(increment_address(Ipv4Addr::new(70, 70, 0, 1), 64), Ipv4Addr::new(70, 70, 0, 65));
/// assert_eq!(increment_address(Ipv4Addr::new(255, 255, 255, 255), 2), Ipv4Addr::new(0, 0, 0, 1));
/// ```
pub fn increment_address(base: Ipv4Addr, offset: u64) -> Ipv4Addr {
    let value = u64::from(u32::from(base)).wrapping_add(offset);
    Ipv4Addr::from(value as u32)
}

/// Smallest power of two that is `>= n`.
///
/// Anything `<= 0` maps to 1.
pub fn next_power_of_two(n: i64) -> u64 {
    if n <= 0 {
        return 1;
    }
    (n as u64).next_power_of_two()
}

/// Number of right shifts needed to reduce `x` to 1.
///
/// For a power of two `2^k` this is `k`. Non-powers round down, and 0
/// yields 0.
pub fn bit_length(x: u64) -> u32 {
    x.checked_ilog2().unwrap_or(0)
}

/// CIDR prefix length of a block holding `block_size` addresses.
pub fn prefix_length(block_size: u64) -> u32 {
    32u32.saturating_sub(bit_length(block_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_within_octet() {
        let base = Ipv4Addr::new(10, 0, 0, 1);
        assert_eq!(increment_address(base, 0), base);
        assert_eq!(increment_address(base, 9), Ipv4Addr::new(10, 0, 0, 10));
    }

    #[test]
    fn test_increment_carries_between_octets() {
        assert_eq!(
            increment_address(Ipv4Addr::new(70, 70, 0, 255), 1),
            Ipv4Addr::new(70, 70, 1, 0)
        );
        assert_eq!(
            increment_address(Ipv4Addr::new(70, 70, 0, 1), 50 * 64),
            Ipv4Addr::new(70, 70, 12, 129)
        );
        assert_eq!(
            increment_address(Ipv4Addr::new(10, 255, 255, 255), 1),
            Ipv4Addr::new(11, 0, 0, 0)
        );
    }

    #[test]
    fn test_increment_matches_integer_addition() {
        let bases = [0u32, 1, 0x4646_0001, 0x7fff_ffff, 0xfffe_0000];
        let offsets = [0u64, 1, 63, 256, 65_536, 1 << 20];
        for &base in &bases {
            for &offset in &offsets {
                let expected = u64::from(base) + offset;
                if expected < (1u64 << 32) {
                    let result = increment_address(Ipv4Addr::from(base), offset);
                    assert_eq!(u64::from(u32::from(result)), expected);
                }
            }
        }
    }

    #[test]
    fn test_increment_wraps_on_overflow() {
        assert_eq!(
            increment_address(Ipv4Addr::new(255, 255, 255, 255), 1),
            Ipv4Addr::new(0, 0, 0, 0)
        );
        assert_eq!(
            increment_address(Ipv4Addr::new(255, 255, 255, 0), 512),
            Ipv4Addr::new(0, 0, 1, 0)
        );
        assert_eq!(
            increment_address(Ipv4Addr::new(1, 2, 3, 4), 1u64 << 32),
            Ipv4Addr::new(1, 2, 3, 4)
        );
    }

    #[test]
    fn test_next_power_of_two_floor() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(-1), 1);
        assert_eq!(next_power_of_two(i64::MIN), 1);
    }

    #[test]
    fn test_next_power_of_two_values() {
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(50), 64);
        assert_eq!(next_power_of_two(64), 64);
        assert_eq!(next_power_of_two(100), 128);
        assert_eq!(next_power_of_two(500), 512);
        assert_eq!(next_power_of_two(1025), 2048);
    }

    #[test]
    fn test_next_power_of_two_properties() {
        for n in 1..=5000i64 {
            let p = next_power_of_two(n);
            assert!(p.is_power_of_two(), "{} is not a power of two", p);
            assert!(p >= n as u64);
            if !(n as u64).is_power_of_two() {
                assert!(p / 2 < n as u64, "{} is not the smallest power for {}", p, n);
            } else {
                assert_eq!(p, n as u64);
            }
        }
    }

    #[test]
    fn test_bit_length_of_powers() {
        for k in 0..63u32 {
            assert_eq!(bit_length(1u64 << k), k);
        }
    }

    #[test]
    fn test_bit_length_edges() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 0);
        assert_eq!(bit_length(3), 1);
        assert_eq!(bit_length(100), 6);
    }

    #[test]
    fn test_prefix_length() {
        assert_eq!(prefix_length(1), 32);
        assert_eq!(prefix_length(64), 26);
        assert_eq!(prefix_length(128), 25);
        assert_eq!(prefix_length(512), 23);
        assert_eq!(prefix_length(1u64 << 32), 0);
    }
}
