use crate::backend::error::BackendError::{MalformedRoster, MemberUpdateFailed, MembersRetrievalFailed};
use crate::completion::completion_form::{CompletionForm, SubmitOutcome};
use crate::configuration::Configuration;
use crate::error::ApplicationError::{Backend, Leader, Web};
use crate::error::{ApplicationError, Result};
use crate::leader::error::LeaderError::{EmptyName, LeaderNotFound};
use crate::leader::group_leaders::GroupLeaders;
use crate::leader::resolve::resolve_and_store;
use crate::member::filtered_set::FilteredSet;
use crate::session::session_storage::{SessionSlot, SessionStorage};
use crate::session::wizard_session::WizardSession;
use crate::tools::web::build_client;
use crate::web::error::WebError;
use crate::web::error::WebError::InputsMismatch;
use log::{debug, error, warn};
use rocket::form::Form;
use rocket::response::Redirect;
use rocket::{Request, State};
use rocket_dyn_templates::{Template, context};
use std::collections::HashMap;
use std::sync::Mutex;

const DEFAULT_ERROR_MESSAGE: &str = "오류가 발생했습니다";

#[derive(FromForm, Debug)]
pub struct NameInput {
    #[field(default = String::new())]
    name: String,
}

#[derive(FromForm, Debug)]
pub struct CompletionInputs {
    #[field(default = HashMap::new())]
    drafts: HashMap<usize, DraftInput>,
}

/// The inputs of one draft, posted as `drafts[index].field`.
/// `user_id` ties the inputs to the draft they were rendered for.
#[derive(FromForm, Debug)]
pub struct DraftInput {
    user_id: Option<String>,
    birth_year: Option<String>,
    phone_number: Option<String>,
}

#[get("/")]
pub async fn name_input() -> Template {
    render_name_input("", None)
}

#[post("/", data = "<name_form>")]
pub async fn submit_name(
    name_form: Form<NameInput>,
    session: WizardSession,
    configuration: &State<Configuration>,
    group_leaders: &State<GroupLeaders>,
    session_storage: &State<Mutex<SessionStorage>>,
) -> Result<Redirect, Template> {
    let name = name_form.into_inner().name;
    let slot = session.slot(session_storage.inner());

    match resolve(&slot, configuration, group_leaders, &name).await {
        Ok(filtered_set) => {
            debug!(
                "Members resolved [session: {}, count: {}]",
                session.id(),
                filtered_set.len()
            );
            Ok(Redirect::to(uri!(member_input)))
        }
        Err(error) => {
            debug!("Resolution failed [session: {}, error: {error}]", session.id());
            Err(render_name_input(&name, Some(user_message(&error))))
        }
    }
}

async fn resolve(
    slot: &SessionSlot<'_>,
    configuration: &Configuration,
    group_leaders: &GroupLeaders,
    name: &str,
) -> Result<FilteredSet> {
    let client = build_client()?;
    resolve_and_store(slot, &client, configuration.backend_api(), group_leaders, name).await
}

#[get("/members")]
pub async fn member_input(
    session: WizardSession,
    session_storage: &State<Mutex<SessionStorage>>,
) -> Template {
    let slot = session.slot(session_storage.inner());
    render_member_input(&CompletionForm::load(&slot), None)
}

#[post("/members", data = "<inputs>")]
pub async fn submit_members(
    inputs: Form<CompletionInputs>,
    session: WizardSession,
    configuration: &State<Configuration>,
    session_storage: &State<Mutex<SessionStorage>>,
) -> Result<Redirect, Template> {
    let slot = session.slot(session_storage.inner());
    let mut form = CompletionForm::load(&slot);
    if form.is_empty() {
        return Err(render_member_input(&form, None));
    }
    if let Err(error) = apply_inputs(&mut form, inputs.into_inner()) {
        let error = ApplicationError::from(error);
        warn!("Submission refused [session: {}, error: {error}]", session.id());
        return Err(render_member_input(&form, Some(user_message(&error))));
    }

    match submit(&mut form, &slot, configuration).await {
        Ok(SubmitOutcome::Completed) => Ok(Redirect::to(uri!(complete))),
        Ok(SubmitOutcome::Blocked) => Err(render_member_input(&form, None)),
        Err(error) => {
            error!("Completion failed [session: {}, error: {error}]", session.id());
            Err(render_member_input(&form, Some(user_message(&error))))
        }
    }
}

async fn submit(
    form: &mut CompletionForm,
    slot: &SessionSlot<'_>,
    configuration: &Configuration,
) -> Result<SubmitOutcome> {
    let client = build_client()?;
    form.submit(slot, &client, configuration.backend_api()).await
}

/// Inputs are matched to drafts by their posted index.
/// Nothing is applied unless every index points to a draft of the same `user_id`.
fn apply_inputs(form: &mut CompletionForm, inputs: CompletionInputs) -> Result<(), WebError> {
    let mut inputs: Vec<(usize, DraftInput)> = inputs.drafts.into_iter().collect();
    inputs.sort_by_key(|(index, _)| *index);

    if let Some((index, input)) = inputs
        .iter()
        .find(|(index, input)| !matches_draft(form, *index, input))
    {
        debug!("Inputs don't match any draft [index: {index}, user_id: {:?}]", input.user_id);
        return Err(InputsMismatch(*index));
    }

    for (index, input) in inputs {
        if let Some(birth_year) = input.birth_year {
            form.set_birth_year_input(index, birth_year);
        }
        if let Some(phone_number) = input.phone_number {
            form.set_phone_number_input(index, phone_number);
        }
    }
    Ok(())
}

fn matches_draft(form: &CompletionForm, index: usize, input: &DraftInput) -> bool {
    match (form.drafts().get(index), input.user_id.as_deref()) {
        (Some(draft), Some(user_id)) => draft.user_id().to_string() == user_id,
        _ => false,
    }
}

#[post("/members/back")]
pub async fn back_to_name_input(
    session: WizardSession,
    session_storage: &State<Mutex<SessionStorage>>,
) -> Redirect {
    let slot = session.slot(session_storage.inner());
    CompletionForm::load(&slot).back(&slot);
    Redirect::to(uri!(name_input))
}

#[get("/complete")]
pub async fn complete() -> Template {
    Template::render(
        "complete",
        context! {
            title: "완료"
        },
    )
}

#[catch(404)]
pub async fn not_found(req: &Request<'_>) -> Template {
    Template::render(
        "error/404",
        context! {
            title: "페이지를 찾을 수 없습니다",
            uri: req.uri().to_string()
        },
    )
}

fn render_name_input(name: &str, error: Option<String>) -> Template {
    Template::render(
        "name-input",
        context! {
            title: "그룹장 확인",
            name: name,
            error: error
        },
    )
}

fn render_member_input(form: &CompletionForm, alert: Option<String>) -> Template {
    Template::render(
        "member-input",
        context! {
            title: "그룹원 정보 보완",
            drafts: form.drafts(),
            alert: alert
        },
    )
}

fn user_message(error: &ApplicationError) -> String {
    match error {
        Leader(EmptyName) => "이름을 입력해주세요".to_owned(),
        Leader(LeaderNotFound(_)) => "그룹장을 찾을 수 없습니다".to_owned(),
        Backend(MembersRetrievalFailed(group_id) | MalformedRoster(group_id)) => {
            format!("멤버 정보를 가져오는데 실패했습니다 (ID: {group_id})")
        }
        Backend(MemberUpdateFailed(name)) => format!("멤버 {name} 업데이트 실패"),
        Web(InputsMismatch(_)) => {
            "그룹원 목록이 변경되었습니다. 다시 입력해주세요".to_owned()
        }
        _ => DEFAULT_ERROR_MESSAGE.to_owned(),
    }
}
