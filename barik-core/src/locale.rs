//! Display tables for report labels (Spanish and Basque).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{DayPart, MonthKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    Eu,
}

impl Language {
    pub fn locale(&self) -> &'static Locale {
        match self {
            Language::Es => &ES,
            Language::Eu => &EU,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::Eu => "eu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "eu" => Ok(Language::Eu),
            other => Err(format!("unsupported language: {other} (expected es or eu)")),
        }
    }
}

/// Month, weekday and day-part names. Weekdays start on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub month_names: [&'static str; 12],
    pub weekday_names: [&'static str; 7],
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub night: &'static str,
}

impl Locale {
    pub fn month_name(&self, month: MonthKey) -> &'static str {
        self.month_names[month.index0()]
    }

    /// "Enero 2025"
    pub fn month_label(&self, month: MonthKey) -> String {
        format!("{} {}", self.month_name(month), month.year)
    }

    /// "Ene 25", used by the chronological series
    pub fn short_month_label(&self, month: MonthKey) -> String {
        let abbrev: String = self.month_name(month).chars().take(3).collect();
        format!("{} {:02}", abbrev, month.year.rem_euclid(100))
    }

    pub fn day_part(&self, part: DayPart) -> &'static str {
        match part {
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Night => self.night,
        }
    }
}

pub static ES: Locale = Locale {
    month_names: [
        "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto", "Septiembre",
        "Octubre", "Noviembre", "Diciembre",
    ],
    weekday_names: ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"],
    morning: "Mañana (06-14h)",
    afternoon: "Tarde (14-22h)",
    night: "Noche (22-06h)",
};

pub static EU: Locale = Locale {
    month_names: [
        "Urtarrila", "Otsaila", "Martxoa", "Apirila", "Maiatza", "Ekaina", "Uztaila", "Abuztua",
        "Iraila", "Urria", "Azaroa", "Abendua",
    ],
    weekday_names: ["Iga", "Ast", "Ast", "Ast", "Ost", "Osti", "Lar"],
    morning: "Goiza (06-14h)",
    afternoon: "Arratsaldea (14-22h)",
    night: "Gaua (22-06h)",
};
