//! Command and query surface the presentation shell drives.
//!
//! Every user intent maps to one function over [`AppState`]; each returns the
//! updated state synchronously.

use anyhow::Result;
use serde::Serialize;

use crate::{
    admin::{self, AdminDashboard},
    catalog::Genre,
    db::{Member, Plan},
    ledger::LedgerError,
    timer::{TimerSnapshot, TimerState},
    AppState,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub timer: TimerSnapshot,
    pub selected_plan: Plan,
    pub selected_genre: Genre,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "tab", rename_all = "camelCase")]
pub enum View {
    User(UserView),
    Admin(AdminDashboard),
}

pub async fn get_timer_state(state: &AppState) -> TimerSnapshot {
    state.timer.get_snapshot().await
}

pub async fn start_timer(state: &AppState) -> TimerState {
    state.timer.start().await
}

pub async fn pause_timer(state: &AppState) -> TimerState {
    state.timer.pause().await
}

pub async fn reset_timer(state: &AppState) -> TimerState {
    state.timer.reset().await
}

/// Subscribe a member. Without an explicit plan the shell's selected plan
/// applies.
pub async fn add_member(
    state: &AppState,
    name: &str,
    plan: Option<Plan>,
) -> Result<Member, LedgerError> {
    let plan = plan.unwrap_or_else(|| state.settings.selected_plan());
    state.ledger.add_member(name, plan).await
}

pub async fn list_members(state: &AppState) -> Vec<Member> {
    state.ledger.list_members().await
}

pub async fn get_admin_dashboard(state: &AppState) -> AdminDashboard {
    admin::dashboard(&state.ledger).await
}

pub fn recommendations_for(state: &AppState, genre: &str) -> Vec<String> {
    to_owned_titles(state.catalog.recommendations_for_name(genre))
}

pub fn get_recommendations(state: &AppState) -> Vec<String> {
    to_owned_titles(
        state
            .catalog
            .recommendations_for(state.settings.selected_genre()),
    )
}

pub fn select_genre(state: &AppState, genre: Genre) -> Result<Vec<String>> {
    state.settings.update_selected_genre(genre)?;
    Ok(get_recommendations(state))
}

pub fn select_plan(state: &AppState, plan: Plan) -> Result<Plan> {
    state.settings.update_selected_plan(plan)?;
    Ok(plan)
}

pub async fn switch_tab(state: &AppState, tab: Tab) -> View {
    state.set_active_tab(tab);
    current_view(state).await
}

pub async fn current_view(state: &AppState) -> View {
    match state.active_tab() {
        Tab::User => View::User(UserView {
            timer: get_timer_state(state).await,
            selected_plan: state.settings.selected_plan(),
            selected_genre: state.settings.selected_genre(),
            recommendations: get_recommendations(state),
        }),
        Tab::Admin => View::Admin(get_admin_dashboard(state).await),
    }
}

fn to_owned_titles(titles: Vec<&str>) -> Vec<String> {
    titles.into_iter().map(str::to_string).collect()
}
