/// Offset between Gregorian and Buddhist Era years.
pub(crate) const BE_OFFSET: i32 = 543;

/// Month (1-12) on which the fiscal year rolls over.
const FISCAL_START_MONTH: u32 = 8;

/// Month (1-12) on which the academic year starts.
const ACADEMIC_START_MONTH: u32 = 6;

pub(crate) fn be_year(gregorian: i32) -> i32 {
    gregorian + BE_OFFSET
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YearKind {
    Fiscal,
    Calendar,
    Academic,
}

impl YearKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fiscal => "fiscal",
            Self::Calendar => "calendar",
            Self::Academic => "academic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fiscal => "ปีงบประมาณ",
            Self::Calendar => "ปีปฏิทิน",
            Self::Academic => "ปีการศึกษา",
        }
    }

    /// Accepts the stored key, a few aliases, or the Thai label.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "fiscal" | "f" | "budget" => Some(Self::Fiscal),
            "calendar" | "c" | "solar" | "buddhist" => Some(Self::Calendar),
            "academic" | "a" | "school" => Some(Self::Academic),
            _ => Self::all().iter().copied().find(|k| k.label() == trimmed),
        }
    }

    pub fn all() -> &'static [YearKind] {
        &[Self::Fiscal, Self::Calendar, Self::Academic]
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Fiscal => Self::Calendar,
            Self::Calendar => Self::Academic,
            Self::Academic => Self::Fiscal,
        }
    }
}

impl std::fmt::Display for YearKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three year bucketings of a single (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBuckets {
    pub fiscal_year: i32,
    pub academic_year: i32,
    pub calendar_year: i32,
}

impl YearBuckets {
    pub fn get(&self, kind: YearKind) -> i32 {
        match kind {
            YearKind::Fiscal => self.fiscal_year,
            YearKind::Calendar => self.calendar_year,
            YearKind::Academic => self.academic_year,
        }
    }
}

/// Classify a Buddhist Era year and month into fiscal, academic and calendar years.
pub(crate) fn classify(year: i32, month: u32) -> YearBuckets {
    let fiscal_year = if month >= FISCAL_START_MONTH {
        year + 1
    } else {
        year
    };
    let academic_year = if month >= ACADEMIC_START_MONTH {
        year
    } else {
        year - 1
    };
    YearBuckets {
        fiscal_year,
        academic_year,
        calendar_year: year,
    }
}

#[cfg(test)]
mod tests;
