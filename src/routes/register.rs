use axum::{extract::State, response::Html};
use axum_extra::extract::Form;
use chrono::Utc;
use minijinja::context;
use serde::Deserialize;

use super::AppError;
use crate::{
    registration::{self, NewAttendee},
    router::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub events: Vec<i32>,
}

pub async fn registration_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let events = registration::open_for_registration(&state.db, Utc::now()).await?;
    let events: Vec<_> = events
        .iter()
        .map(|e| context! { id => e.id, label => e.to_string(), is_live => e.is_live_event })
        .collect();

    let tmpl = state.templates.get_template("register.html")?;
    let html = tmpl.render(context! { events => events })?;
    Ok(Html(html))
}

pub async fn submit_registration(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Html<String>, AppError> {
    let attendee = NewAttendee {
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
    };
    let registration = registration::register(&state.db, &attendee, &form.events).await?;

    let tmpl = state.templates.get_template("registered.html")?;
    let html = tmpl.render(context! {
        name => registration.attendee.full_name(),
        booked => registration.booked.len(),
    })?;
    Ok(Html(html))
}
