use regex::Regex;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send>;

pub fn required() -> Validator {
    Box::new(|value: &str| {
        if value.trim().is_empty() {
            Err("This field is required".to_string())
        } else {
            Ok(())
        }
    })
}

pub fn numeric() -> Validator {
    Box::new(|value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.parse::<f64>().is_ok() {
            Ok(())
        } else {
            Err("Not a number".to_string())
        }
    })
}

pub fn pattern(pattern: &str) -> Validator {
    let re = Regex::new(pattern).expect("Invalid regex pattern");
    Box::new(move |value: &str| {
        if value.is_empty() || re.is_match(value) {
            Ok(())
        } else {
            Err(format!("Value must match pattern: {}", re.as_str()))
        }
    })
}

pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{numeric, pattern, required};

    #[test]
    fn numeric_accepts_empty_and_numbers() {
        let check = numeric();
        assert!(check("").is_ok());
        assert!(check("-3.5").is_ok());
        assert!(check("abc").is_err());
    }

    #[test]
    fn required_rejects_whitespace() {
        let check = required();
        assert!(check("  ").is_err());
        assert!(check("x").is_ok());
    }

    #[test]
    fn pattern_skips_empty() {
        let check = pattern(r"^\d{4}-\d{2}-\d{2}$");
        assert!(check("").is_ok());
        assert!(check("2026-08-28").is_ok());
        assert!(check("28.08.2026").is_err());
    }
}
