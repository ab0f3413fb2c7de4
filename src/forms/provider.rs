//! Healthcare Provider form.

use crate::error::CoreError;
use crate::models::{Indicator, IndicatorColor};

use super::FormContext;

pub const NEW_PROVIDER_INTRO: &str = "Add a new healthcare provider to the system";

pub fn refresh(ctx: &mut FormContext) -> Result<(), CoreError> {
    let status = ctx.provider()?.status;

    ctx.dashboard.clear_buttons();
    if ctx.is_new {
        ctx.dashboard.intro = Some(Indicator::new(NEW_PROVIDER_INTRO, IndicatorColor::Blue));
    } else {
        ctx.dashboard.intro = None;
        ctx.dashboard.add_button("View Full Schedule", "View");
        ctx.dashboard.add_button("Check Availability", "Actions");
        ctx.dashboard.add_button("View Consultations", "View");
    }
    ctx.dashboard.page_indicator = Some(Indicator::new(status.as_str(), status.indicator_color()));
    Ok(())
}

pub fn status_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let status = ctx.provider()?.status;
    ctx.dashboard.page_indicator = Some(Indicator::new(status.as_str(), status.indicator_color()));
    Ok(())
}

/// Re-apply the specialty so its suggested fee fills in.
pub fn specialty_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let provider = ctx.provider_mut()?;
    if let Some(specialty) = provider.specialty.clone() {
        provider.set_specialty(&specialty);
    }
    Ok(())
}

/// Invalid addresses are cleared and reported. The edit itself is not an
/// error for the host.
pub fn email_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let provider = ctx.provider_mut()?;
    let Some(email) = provider.email.clone() else {
        return Ok(());
    };
    if let Err(CoreError::InvalidInput { reason, .. }) = provider.set_email(&email) {
        ctx.dashboard.msgprint("Invalid Email", reason, IndicatorColor::Red);
    }
    Ok(())
}

pub fn phone_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let provider = ctx.provider_mut()?;
    if let Some(phone) = provider.phone.clone() {
        provider.set_phone(&phone);
    }
    Ok(())
}

pub fn schedule_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    if let Err(e) = ctx.provider()?.validate_schedule() {
        report_invalid(ctx, &e);
    }
    Ok(())
}

pub fn before_save(ctx: &mut FormContext) -> Result<(), CoreError> {
    let provider = ctx.provider()?;
    let result = match provider.email.as_deref() {
        Some(email) => crate::providers::validate_email(email),
        None => Ok(()),
    }
    .and_then(|()| provider.validate_schedule());
    if let Err(e) = &result {
        report_invalid(ctx, e);
    }
    result
}

fn report_invalid(ctx: &mut FormContext, err: &CoreError) {
    let CoreError::InvalidInput { field, reason } = err else {
        return;
    };
    let title = match field.as_str() {
        "day" => "Duplicate Day",
        "email" => "Invalid Email",
        _ => "Invalid Time Range",
    };
    ctx.dashboard.msgprint(title, reason.clone(), IndicatorColor::Red);
}
