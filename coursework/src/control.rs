#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
    NotANumber,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::Positive => "positive",
            Sign::Negative => "negative",
            Sign::Zero => "zero",
            Sign::NotANumber => "Not a Number",
        }
    }
}

pub fn check_sign(n: impl Into<f64>) -> Sign {
    let n = n.into();
    if n.is_nan() {
        Sign::NotANumber
    } else if n > 0.0 {
        Sign::Positive
    } else if n < 0.0 {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Trial division by odd numbers up to `sqrt(n)`.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

pub fn primes() -> impl Iterator<Item = i64> {
    (2..).filter(|&n| is_prime(n))
}

pub fn ten_primes() -> Vec<i64> {
    primes().take(10).collect()
}

pub fn sum_100() -> u32 {
    let mut next = 100;
    let mut total = 0;
    while next >= 1 {
        total += next;
        next -= 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_prime(n: i64) -> bool {
        n >= 2 && (2..n).all(|d| n % d != 0)
    }

    #[test]
    fn is_prime_matches_definition_up_to_100() {
        for n in 0..=100 {
            assert_eq!(is_prime(n), naive_prime(n), "n = {n}");
        }
        assert!(!is_prime(-7));
        assert!(!is_prime(49));
        assert!(is_prime(7919));
    }

    #[test]
    fn first_ten_primes() {
        assert_eq!(ten_primes(), [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn sum_of_first_hundred() {
        assert_eq!(sum_100(), 5050);
    }

    #[test]
    fn signs() {
        assert_eq!(check_sign(5), Sign::Positive);
        assert_eq!(check_sign(-0.5), Sign::Negative);
        assert_eq!(check_sign(0), Sign::Zero);
        assert_eq!(check_sign(f64::NAN), Sign::NotANumber);
        assert_eq!(Sign::NotANumber.as_str(), "Not a Number");
    }
}
