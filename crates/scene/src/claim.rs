use foundation::color::Rgb;

/// Kind of claim attributed to a country; drives the badge color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ClaimCategory {
    #[default]
    NoClaim,
    DenialOfWarming,
    DenialOfCause,
    DenialOfImpact,
    DenialOfSolution,
    DenialOfMovement,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 6] = [
        ClaimCategory::NoClaim,
        ClaimCategory::DenialOfWarming,
        ClaimCategory::DenialOfCause,
        ClaimCategory::DenialOfImpact,
        ClaimCategory::DenialOfSolution,
        ClaimCategory::DenialOfMovement,
    ];

    /// Unknown codes fall back to [`ClaimCategory::NoClaim`].
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => ClaimCategory::DenialOfWarming,
            2 => ClaimCategory::DenialOfCause,
            3 => ClaimCategory::DenialOfImpact,
            4 => ClaimCategory::DenialOfSolution,
            5 => ClaimCategory::DenialOfMovement,
            _ => ClaimCategory::NoClaim,
        }
    }

    /// Parses codes such as `"1_1"` or `"4"`: the leading digit selects the
    /// category.
    pub fn from_code(code: &str) -> Self {
        code.trim()
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(ClaimCategory::NoClaim, |d| Self::from_index(i64::from(d)))
    }

    pub fn index(self) -> usize {
        match self {
            ClaimCategory::NoClaim => 0,
            ClaimCategory::DenialOfWarming => 1,
            ClaimCategory::DenialOfCause => 2,
            ClaimCategory::DenialOfImpact => 3,
            ClaimCategory::DenialOfSolution => 4,
            ClaimCategory::DenialOfMovement => 5,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ClaimCategory::NoClaim => Rgb::from_hex(0xADADAD),
            ClaimCategory::DenialOfWarming => Rgb::from_hex(0xFF5964),
            ClaimCategory::DenialOfCause => Rgb::from_hex(0xFFE74C),
            ClaimCategory::DenialOfImpact => Rgb::from_hex(0x6BF178),
            ClaimCategory::DenialOfSolution => Rgb::from_hex(0x35A7FF),
            ClaimCategory::DenialOfMovement => Rgb::from_hex(0xFFA058),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ClaimCategory::NoClaim => "No claim",
            ClaimCategory::DenialOfWarming => "Global warming is not happening",
            ClaimCategory::DenialOfCause => "Human greenhouse gases are not causing climate change",
            ClaimCategory::DenialOfImpact => "Climate impacts are beneficial or not bad",
            ClaimCategory::DenialOfSolution => "Climate solutions won't work",
            ClaimCategory::DenialOfMovement => "Climate movement or science is unreliable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub text: String,
    pub category: ClaimCategory,
}

impl Claim {
    pub fn new(text: impl Into<String>, category: ClaimCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_use_leading_digit() {
        assert_eq!(ClaimCategory::from_code("1_1"), ClaimCategory::DenialOfWarming);
        assert_eq!(ClaimCategory::from_code("5"), ClaimCategory::DenialOfMovement);
        assert_eq!(ClaimCategory::from_code("9_2"), ClaimCategory::NoClaim);
        assert_eq!(ClaimCategory::from_code("x"), ClaimCategory::NoClaim);
        assert_eq!(ClaimCategory::from_code(""), ClaimCategory::NoClaim);
        for c in ClaimCategory::ALL {
            assert_eq!(ClaimCategory::from_index(c.index() as i64), c);
        }
    }

    #[test]
    fn every_category_has_a_distinct_color() {
        let colors: Vec<Rgb> = ClaimCategory::ALL.iter().map(|c| c.color()).collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| b != a));
        }
        assert_eq!(ClaimCategory::DenialOfWarming.color().to_css(), "rgb(255,89,100)");
    }
}
