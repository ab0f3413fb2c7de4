use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(CoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(SenderType {
    Patient => "Patient",
    Provider => "Provider",
});

impl SenderType {
    /// The other party of a consultation thread.
    pub fn counterpart(&self) -> Self {
        match self {
            Self::Patient => Self::Provider,
            Self::Provider => Self::Patient,
        }
    }
}

str_enum!(ConsultationStatus {
    Pending => "Pending",
    Scheduled => "Scheduled",
    InProgress => "In Progress",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

str_enum!(Priority {
    Low => "Low",
    Normal => "Normal",
    High => "High",
    Urgent => "Urgent",
});

str_enum!(PaymentStatus {
    Unpaid => "Unpaid",
    Paid => "Paid",
    Refunded => "Refunded",
});

str_enum!(ProviderStatus {
    Active => "Active",
    Inactive => "Inactive",
    OnLeave => "On Leave",
});

str_enum!(MealTiming {
    BeforeMeal => "Before Meal",
    AfterMeal => "After Meal",
    WithMeal => "With Meal",
});

str_enum!(PrescriptionFrequency {
    OnceDaily => "Once Daily",
    Bid => "BID",
    Tid => "TID",
    Qid => "QID",
    Prn => "PRN",
});

str_enum!(IndicatorColor {
    Red => "red",
    Orange => "orange",
    Blue => "blue",
    Green => "green",
    Gray => "gray",
});
