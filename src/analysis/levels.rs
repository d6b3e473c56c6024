use crate::domain::{Direction, FibRatio};
use crate::error::EvalError;
use crate::models::LevelSet;

/// Projects the extension ladder from the three anchor prices.
///
/// span = |B - A|. Buy structures extend above C, Sell below:
/// `level[r] = C + sign * span * r` for every ratio in the ladder.
/// Non-finite input refuses the whole evaluation rather than silently
/// producing a NaN ladder.
pub fn derive_levels(
    direction: Direction,
    price_a: f64,
    price_b: f64,
    price_c: f64,
) -> Result<LevelSet, EvalError> {
    if !(price_a.is_finite() && price_b.is_finite() && price_c.is_finite()) {
        return Err(EvalError::insufficient("missing point data: non-finite anchor price"));
    }

    let span = (price_b - price_a).abs();
    let sign = direction.sign();
    Ok(LevelSet::from_fn(|ratio| price_c + sign * span * ratio.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_projects_above_c() {
        let levels = derive_levels(Direction::Buy, 100.0, 200.0, 100.0).unwrap();
        assert_eq!(levels.price(FibRatio::R0), 100.0);
        assert_eq!(levels.price(FibRatio::R1_000), 200.0);
        assert!((levels.price(FibRatio::R1_618) - 261.8).abs() < 1e-9);
        assert!((levels.price(FibRatio::R2_618) - 361.8).abs() < 1e-9);
        assert!((levels.price(FibRatio::R4_236) - 523.6).abs() < 1e-9);
    }

    #[test]
    fn sell_projects_below_c() {
        let levels = derive_levels(Direction::Sell, 200.0, 100.0, 200.0).unwrap();
        assert_eq!(levels.price(FibRatio::R0), 200.0);
        assert_eq!(levels.price(FibRatio::R1_000), 100.0);
        assert!((levels.price(FibRatio::R0_500) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn level_zero_is_exactly_c() {
        // ratio 0 must reproduce C bit-for-bit, both sides
        let c = 2365.417;
        let buy = derive_levels(Direction::Buy, 2300.0, 2400.0, c).unwrap();
        let sell = derive_levels(Direction::Sell, 2400.0, 2300.0, c).unwrap();
        assert_eq!(buy.price(FibRatio::R0), c);
        assert_eq!(sell.price(FibRatio::R0), c);
    }

    #[test]
    fn span_uses_absolute_distance() {
        // swapped A/B must not flip the ladder
        let a_first = derive_levels(Direction::Buy, 100.0, 200.0, 150.0).unwrap();
        let b_first = derive_levels(Direction::Buy, 200.0, 100.0, 150.0).unwrap();
        assert_eq!(a_first, b_first);
    }

    #[test]
    fn non_finite_input_is_refused() {
        let err = derive_levels(Direction::Buy, f64::NAN, 200.0, 100.0).unwrap_err();
        assert!(matches!(err, EvalError::InsufficientData { .. }));
        assert!(derive_levels(Direction::Sell, 100.0, f64::INFINITY, 100.0).is_err());
    }
}
