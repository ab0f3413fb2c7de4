//! Medication Schedule form: stock headline, action buttons, save checks
//! and the refill / dose / activation actions.

use crate::error::CoreError;
use crate::medications::RefillPreview;
use crate::models::IndicatorColor;
use crate::remote::RemoteCall;

use super::FormContext;

pub const REFILL_STOCK: &str = "Refill Stock";
pub const DEACTIVATE: &str = "Deactivate";
pub const ACTIVATE: &str = "Activate";
pub const VIEW_LOGS: &str = "View Logs";
pub const RECORD_DOSE: &str = "Record Dose Taken";

pub fn refresh(ctx: &mut FormContext) -> Result<(), CoreError> {
    let schedule = ctx.schedule()?;
    let headline = schedule.status_headline();
    let offers_refill = schedule.offers_refill_action(&ctx.config);
    let offers_dose = schedule.offers_record_dose();
    let is_active = schedule.is_active;

    ctx.dashboard.clear_buttons();
    if !ctx.is_new {
        if offers_refill {
            ctx.dashboard.add_button(REFILL_STOCK, "Actions");
        }
        if is_active {
            ctx.dashboard.add_button(DEACTIVATE, "Actions");
        } else {
            ctx.dashboard.add_button(ACTIVATE, "Actions");
        }
        ctx.dashboard.add_button(VIEW_LOGS, "View");
        if offers_dose {
            ctx.dashboard.add_button(RECORD_DOSE, "Actions");
        }
    }
    ctx.dashboard.headline = Some(headline);
    Ok(())
}

/// Any depletion input changed. Derived values are read straight from the
/// schedule, so only the headline needs redrawing.
pub fn recalculate(ctx: &mut FormContext) -> Result<(), CoreError> {
    let schedule = ctx.schedule()?;
    let depletion = schedule.depletion();
    tracing::debug!(
        schedule = %schedule.id,
        daily = depletion.daily_consumption,
        days = depletion.days_until_depletion,
        tier = schedule.stock_tier().as_str(),
        "Depletion recalculated"
    );
    ctx.dashboard.headline = Some(schedule.status_headline());
    Ok(())
}

pub fn before_save(ctx: &mut FormContext) -> Result<(), CoreError> {
    let today = ctx.today();
    let result = ctx.schedule()?.validate_for_save(today, &ctx.config);
    if let Err(CoreError::InvalidInput { reason, .. }) = &result {
        ctx.dashboard
            .msgprint("Cannot Save", reason.clone(), IndicatorColor::Red);
    }
    result
}

/// Raise a low-stock alert for delivery when the saved schedule is short.
pub fn after_save(ctx: &mut FormContext) -> Result<(), CoreError> {
    if let Some(alert) = ctx.schedule()?.low_stock_alert(&ctx.config) {
        tracing::info!(schedule = %alert.schedule_id, days = alert.days_until_depletion, "Low stock");
        ctx.alerts.push(alert);
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Button actions
// ═══════════════════════════════════════════

/// Figures for the refill dialog at the configured default quantity.
pub fn open_refill_dialog(ctx: &FormContext) -> Result<RefillPreview, CoreError> {
    ctx.schedule()?
        .refill_preview(i64::from(ctx.config.default_refill_quantity))
}

/// Submit a refill of `quantity` units.
pub fn refill(ctx: &mut FormContext, quantity: i64) -> Result<(), CoreError> {
    let mut next = ctx.schedule()?.clone();
    let change = next.refill(quantity)?;
    ctx.request(RemoteCall::UpdateStock {
        schedule_id: next.id,
        new_stock: change.current_stock,
    });
    Ok(())
}

pub fn record_dose(ctx: &mut FormContext) -> Result<(), CoreError> {
    let mut next = ctx.schedule()?.clone();
    let change = next.consume_dose()?;
    ctx.request(RemoteCall::UpdateStock {
        schedule_id: next.id,
        new_stock: change.current_stock,
    });
    Ok(())
}

/// Discontinue the schedule; its end date becomes today.
pub fn deactivate(ctx: &mut FormContext) -> Result<(), CoreError> {
    let today = ctx.today();
    let mut next = ctx.schedule()?.clone();
    if !next.is_active {
        return Err(CoreError::invalid("is_active", "medication is already inactive"));
    }
    next.deactivate(today);
    ctx.request(RemoteCall::DeactivateMedication { schedule_id: next.id });
    Ok(())
}

pub fn activate(ctx: &mut FormContext) -> Result<(), CoreError> {
    let mut next = ctx.schedule()?.clone();
    if next.is_active {
        return Err(CoreError::invalid("is_active", "medication is already active"));
    }
    next.activate();
    ctx.request(RemoteCall::ActivateMedication { schedule_id: next.id });
    Ok(())
}
