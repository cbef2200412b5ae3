//! Domain bounds for extracted candidates. Validation never fails hard:
//! a candidate outside bounds is dropped and tallied by the merge step.

pub const MIN_FUNCTION: i64 = 1;
pub const MAX_FUNCTION: i64 = 128;
pub const MIN_VALUE: i64 = 0;
pub const MAX_VALUE: i64 = 999;

pub fn is_valid_function_number(n: i64) -> bool {
    (MIN_FUNCTION..=MAX_FUNCTION).contains(&n)
}

pub fn is_valid_value(v: i64) -> bool {
    (MIN_VALUE..=MAX_VALUE).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_number_bounds() {
        assert!(!is_valid_function_number(0));
        assert!(is_valid_function_number(1));
        assert!(is_valid_function_number(128));
        assert!(!is_valid_function_number(129));
        assert!(!is_valid_function_number(-3));
        assert!(!is_valid_function_number(200));
    }

    #[test]
    fn value_bounds() {
        assert!(is_valid_value(0));
        assert!(is_valid_value(999));
        assert!(!is_valid_value(-1));
        assert!(!is_valid_value(1000));
    }
}
