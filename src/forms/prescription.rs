//! Medical Prescription form: patient age and dispensed quantity badges.

use crate::error::CoreError;
use crate::models::{Indicator, IndicatorColor};

use super::FormContext;

pub fn dob_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let age = ctx.prescription()?.patient_age(ctx.today());
    ctx.dashboard.set_indicator(
        "Age",
        age.map(|years| Indicator::new(format!("Age: {years}"), IndicatorColor::Blue)),
    );
    Ok(())
}

/// Frequency or duration edited on an item row.
pub fn items_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let total = ctx.prescription()?.total_quantity();
    ctx.dashboard.set_indicator(
        "Total Quantity",
        Some(Indicator::new(format!("Total Quantity: {total}"), IndicatorColor::Gray)),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dispatch::{DispatchTable, EventKind, Field, PrescriptionField};
    use crate::forms::FormDoc;
    use crate::models::{Prescription, PrescriptionFrequency, PrescriptionItem, SenderType};
    use chrono::NaiveDate;

    fn ctx(dob: Option<NaiveDate>) -> FormContext {
        let rx = Prescription {
            id: "RX-0001".into(),
            patient: "PAT-0001".into(),
            patient_dob: dob,
            items: vec![PrescriptionItem {
                medication_name: "Amoxicillin".into(),
                frequency: Some(PrescriptionFrequency::Tid),
                duration: 7,
            }],
        };
        let now = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        FormContext::new(FormDoc::Prescription(rx), SenderType::Provider, now, AppConfig::default())
    }

    #[test]
    fn age_indicator_follows_dob() {
        let mut c = ctx(NaiveDate::from_ymd_opt(1990, 8, 15));
        DispatchTable::standard()
            .unwrap()
            .dispatch(&mut c, EventKind::FieldChanged(Field::Prescription(PrescriptionField::PatientDob)))
            .unwrap();
        assert_eq!(c.dashboard.indicators[0].label, "Age: 34");

        let mut c = ctx(None);
        dob_changed(&mut c).unwrap();
        assert!(c.dashboard.indicators.is_empty());
    }

    #[test]
    fn quantity_indicator_replaced_on_each_edit() {
        let mut c = ctx(None);
        items_changed(&mut c).unwrap();
        if let FormDoc::Prescription(rx) = &mut c.doc {
            rx.items[0].duration = 10;
        }
        items_changed(&mut c).unwrap();
        assert_eq!(c.dashboard.indicators.len(), 1);
        assert_eq!(c.dashboard.indicators[0].label, "Total Quantity: 30");
    }
}
