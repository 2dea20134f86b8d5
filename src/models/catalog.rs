/// A budget category as code + label, e.g. `02` / `ค่าใช้สอย`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCategory {
    pub code: &'static str,
    pub label: &'static str,
}

impl BudgetCategory {
    /// The form stored in the ledger's category column.
    pub fn display(&self) -> String {
        format!("{} {}", self.code, self.label)
    }

    /// Find a category by code, label, or "code label" (case-insensitive).
    pub fn find(input: &str) -> Option<&'static BudgetCategory> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        BUDGET_CATEGORIES.iter().find(|c| {
            c.code == needle || c.label.to_lowercase() == needle || c.display().to_lowercase() == needle
        })
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.label)
    }
}

pub const BUDGET_CATEGORIES: &[BudgetCategory] = &[
    BudgetCategory { code: "01", label: "ค่าตอบแทน" },
    BudgetCategory { code: "02", label: "ค่าใช้สอย" },
    BudgetCategory { code: "03", label: "ค่าวัสดุ" },
    BudgetCategory { code: "04", label: "ค่าครุภัณฑ์" },
    BudgetCategory { code: "05", label: "ค่าจ้างผู้ช่วยวิจัย" },
    BudgetCategory { code: "06", label: "ค่าเดินทาง" },
    BudgetCategory { code: "07", label: "ค่าจัดประชุมและสัมมนา" },
    BudgetCategory { code: "08", label: "ค่าตีพิมพ์ผลงาน" },
    BudgetCategory { code: "09", label: "ค่าธรรมเนียมและค่าบริการ" },
    BudgetCategory { code: "99", label: "อื่นๆ" },
];

pub const FACULTIES: &[&str] = &[
    "คณะเกษตรศาสตร์และทรัพยากรธรรมชาติ",
    "คณะทันตแพทยศาสตร์",
    "คณะเทคโนโลยีสารสนเทศและการสื่อสาร",
    "คณะนิติศาสตร์",
    "คณะบริหารธุรกิจและนิเทศศาสตร์",
    "คณะพยาบาลศาสตร์",
    "คณะพลังงานและสิ่งแวดล้อม",
    "คณะแพทยศาสตร์",
    "คณะเภสัชศาสตร์",
    "คณะรัฐศาสตร์และสังคมศาสตร์",
    "คณะวิทยาศาสตร์",
    "คณะวิทยาศาสตร์การแพทย์",
    "คณะวิศวกรรมศาสตร์",
    "คณะศิลปศาสตร์",
    "คณะสถาปัตยกรรมศาสตร์และศิลปกรรมศาสตร์",
    "คณะสหเวชศาสตร์",
    "คณะสาธารณสุขศาสตร์",
    "วิทยาลัยการศึกษา",
    "หน่วยงานอื่น",
];

/// Find a faculty by exact name, ignoring surrounding whitespace.
pub fn find_faculty(input: &str) -> Option<&'static str> {
    let needle = input.trim();
    FACULTIES.iter().copied().find(|f| *f == needle)
}
