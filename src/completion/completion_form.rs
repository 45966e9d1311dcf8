use crate::backend::update_member::update_member;
use crate::completion::member_draft::MemberDraft;
use crate::completion::validation::{parse_birth_year, parse_phone_number};
use crate::error::Result;
use crate::member::filtered_set::FilteredSet;
use crate::session::FilteredSetStore;
use chrono::NaiveDate;
use derive_getters::Getters;
use dto::member::{Member, UserId};
use dto::member_update::MemberUpdate;
use futures::future::join_all;
use log::{debug, info, warn};
use reqwest::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one draft is invalid: nothing has been sent.
    Blocked,
    /// Every member has been updated.
    Completed,
}

/// An update ready to be sent for a given member.
#[derive(Debug, Getters, PartialEq)]
pub struct PendingUpdate {
    user_id: UserId,
    name: String,
    update: MemberUpdate,
}

/// The completion form: one draft per member still to complete, in the stored order.
#[derive(Debug, Getters)]
pub struct CompletionForm {
    members: Vec<Member>,
    drafts: Vec<MemberDraft>,
    state: FormState,
}

impl From<FilteredSet> for CompletionForm {
    fn from(filtered_set: FilteredSet) -> Self {
        let members: Vec<Member> = filtered_set.into_iter().collect();
        let drafts = members.iter().map(MemberDraft::from).collect();
        Self {
            members,
            drafts,
            state: FormState::Idle,
        }
    }
}

impl CompletionForm {
    pub fn load<S: FilteredSetStore>(store: &S) -> Self {
        Self::from(store.read())
    }

    /// Nobody needs completion.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn set_birth_year_input(&mut self, index: usize, birth_year: String) {
        if let Some(draft) = self.draft_to_edit(index) {
            draft.set_birth_year_input(birth_year);
        }
    }

    pub fn set_phone_number_input(&mut self, index: usize, phone_number: String) {
        if let Some(draft) = self.draft_to_edit(index) {
            draft.set_phone_number_input(phone_number);
        }
    }

    fn draft_to_edit(&mut self, index: usize) -> Option<&mut MemberDraft> {
        self.leave_failed_state();
        let draft = self.drafts.get_mut(index);
        if draft.is_none() {
            warn!("No draft to edit [index: {index}]");
        }
        draft
    }

    fn leave_failed_state(&mut self) {
        if self.state == FormState::Failed {
            self.state = FormState::Idle;
        }
    }

    pub fn has_errors(&self) -> bool {
        self.drafts.iter().any(MemberDraft::has_error)
    }

    /// Reconcile each draft with its original member.
    ///
    /// A typed value wins over the original one. Fields remaining empty are left out of the update.
    pub fn build_updates(&self) -> Vec<PendingUpdate> {
        self.drafts
            .iter()
            .zip(&self.members)
            .map(|(draft, member)| PendingUpdate {
                user_id: draft.user_id().clone(),
                name: draft.name().clone(),
                update: reconcile(draft, member),
            })
            .collect()
    }

    /// Send every update concurrently and wait for all of them, whatever their outcome.
    ///
    /// If any update fails, the error of the first failing member (in form order) is returned
    /// and the stored members are kept. Updates that succeeded are not rolled back.
    /// When every update succeeds, the stored members are cleared.
    pub async fn submit<S: FilteredSetStore>(
        &mut self,
        store: &S,
        client: &Client,
        base_url: &str,
    ) -> Result<SubmitOutcome> {
        self.leave_failed_state();
        if self.has_errors() {
            debug!("Submission blocked by invalid inputs");
            return Ok(SubmitOutcome::Blocked);
        }

        self.state = FormState::Submitting;
        let updates = self.build_updates();
        let results = join_all(updates.iter().map(|pending_update| {
            update_member(
                client,
                base_url,
                pending_update.user_id(),
                pending_update.name(),
                pending_update.update(),
            )
        }))
        .await;

        if let Some(error) = results.into_iter().find_map(|result| result.err()) {
            self.state = FormState::Failed;
            return Err(error);
        }

        store.clear();
        self.state = FormState::Success;
        info!("Members have been completed [count: {}]", updates.len());
        Ok(SubmitOutcome::Completed)
    }

    /// Give up on the form: unsaved inputs are lost and the stored members are cleared.
    pub fn back<S: FilteredSetStore>(self, store: &S) {
        debug!("Completion abandoned [count: {}]", self.drafts.len());
        store.clear();
    }
}

fn reconcile(draft: &MemberDraft, member: &Member) -> MemberUpdate {
    let birth_date = if draft.birth_year_input().is_empty() {
        known_birth_date(member)
    } else {
        parse_birth_year(draft.birth_year_input())
    };
    let phone_number = if draft.phone_number_input().is_empty() {
        member.phone_number().clone()
    } else {
        Some(parse_phone_number(draft.phone_number_input()))
    };

    MemberUpdate::new(birth_date, phone_number)
}

/// The birth date as known by the backend, derived from the birth year when missing.
fn known_birth_date(member: &Member) -> Option<NaiveDate> {
    let birth_date = member
        .birth_date()
        .as_deref()
        .filter(|birth_date| !birth_date.is_empty())
        .and_then(|birth_date| {
            let date = birth_date.get(..10).unwrap_or(birth_date);
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .inspect_err(|error| {
                    warn!("Unreadable birth date [user_id: {}, birth_date: {birth_date}, error: {error}]", member.user_id())
                })
                .ok()
        });

    birth_date.or_else(|| member.birth_year().as_deref().and_then(parse_birth_year))
}
