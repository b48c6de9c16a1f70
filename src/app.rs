use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpApi;
use crate::board::{ActivityBoard, BoardView};
use crate::card::{cards, ActivityCard, ParticipantRow, Roster, NO_PARTICIPANTS};
use crate::catalog::ActivityCatalog;
use crate::config::BoardConfig;
use crate::state::{BoardAction, BoardState, Listing};
use crate::status::{StatusMessage, STATUS_TTL_MS};

pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

/// `BoardView` backed by the component's reducer and its form node.
#[derive(Clone)]
pub struct PageView {
    dispatcher: UseReducerDispatcher<BoardState>,
    form: NodeRef,
}

impl BoardView for PageView {
    fn render_catalog(&self, catalog: ActivityCatalog) {
        self.dispatcher.dispatch(BoardAction::CatalogLoaded(catalog));
    }

    fn render_load_failure(&self) {
        self.dispatcher.dispatch(BoardAction::CatalogFailed);
    }

    fn show_status(&self, message: StatusMessage) {
        self.dispatcher.dispatch(BoardAction::ShowStatus(message));
    }

    fn reset_form(&self) {
        match self.form.cast::<HtmlFormElement>() {
            Some(form) => form.reset(),
            None => tracing::warn!("signup form is not mounted, nothing to reset"),
        }
    }

    fn confirm(&self, question: &str) -> bool {
        gloo::dialogs::confirm(question)
    }
}

type Board = ActivityBoard<HttpApi, PageView>;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(BoardState::default);
    let form_ref = use_node_ref();
    let email_ref = use_node_ref();
    let activity_ref = use_node_ref();

    // Built once; holds the form ref and dispatcher for the page's lifetime.
    let board: Rc<Board> = {
        let view = PageView { dispatcher: state.dispatcher(), form: form_ref.clone() };
        use_memo((), move |_| {
            let config = BoardConfig::load();
            tracing::debug!(api_base = %config.api_base, "activity board starting");
            ActivityBoard::new(HttpApi::new(&config.api_base), view)
        })
    };

    {
        let board = board.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { board.refresh().await });
            || ()
        });
    }

    // One hide timer at a time: a new status id drops (cancels) the previous timeout.
    {
        let dispatcher = state.dispatcher();
        let status_id = state.status.as_ref().map(|s| s.id);
        use_effect_with(status_id, move |id| {
            let timer = (*id).map(|id| {
                Timeout::new(STATUS_TTL_MS, move || {
                    dispatcher.dispatch(BoardAction::ExpireStatus(id))
                })
            });
            move || drop(timer)
        });
    }

    let on_submit = {
        let board = board.clone();
        let email_ref = email_ref.clone();
        let activity_ref = activity_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(email), Some(activity)) = (
                email_ref.cast::<HtmlInputElement>(),
                activity_ref.cast::<HtmlSelectElement>(),
            ) else {
                tracing::warn!("signup fields are not mounted");
                return;
            };
            let email = email.value();
            let activity = activity.value();
            let board = board.clone();
            spawn_local(async move { board.signup(&activity, &email).await });
        })
    };

    let on_remove = {
        let board = board.clone();
        Callback::from(move |row: ParticipantRow| {
            let board = board.clone();
            spawn_local(async move { board.remove_participant(&row.activity, &row.email).await });
        })
    };

    let list = match &state.listing {
        Listing::Loading => html! { <p>{ "Loading activities..." }</p> },
        Listing::Unavailable => html! { <p class="error">{ LOAD_FAILED }</p> },
        Listing::Ready(catalog) => html! {
            <>
              { for cards(catalog).into_iter().map(|card| html! {
                  <ActivityCardView card={card} on_remove={on_remove.clone()} />
              }) }
            </>
        },
    };

    let message = match &state.status {
        Some(shown) => html! {
            <div id="message" class={classes!("message", shown.message.kind.css_class())}>
              { shown.message.text.clone() }
            </div>
        },
        None => html! { <div id="message" class="message hidden"></div> },
    };

    html! {
      <main class="wrap">
        <header>
          <h1>{ "Mergington High School" }</h1>
          <h2>{ "Extracurricular Activities" }</h2>
        </header>

        <section id="activities-container">
          <h3>{ "Available Activities" }</h3>
          <div id="activities-list">{ list }</div>
        </section>

        <section id="signup-container">
          <h3>{ "Sign Up for an Activity" }</h3>
          <form id="signup-form" ref={form_ref} onsubmit={on_submit}>
            <div class="form-group">
              <label for="email">{ "Student Email:" }</label>
              <input ref={email_ref} type="email" id="email" required=true
                     placeholder="your-email@mergington.edu" />
            </div>
            <div class="form-group">
              <label for="activity">{ "Select Activity:" }</label>
              <select ref={activity_ref} id="activity" required=true>
                { for state.options.iter().map(|name| html! {
                    <option value={name.clone()}>{ name.clone() }</option>
                }) }
              </select>
            </div>
            <button type="submit">{ "Sign Up" }</button>
          </form>
          { message }
        </section>
      </main>
    }
}

#[derive(Properties, PartialEq)]
pub struct ActivityCardProps {
    pub card: ActivityCard,
    pub on_remove: Callback<ParticipantRow>,
}

#[function_component(ActivityCardView)]
pub fn activity_card_view(props: &ActivityCardProps) -> Html {
    let card = &props.card;

    let participants = match &card.roster {
        Roster::Empty => html! { <p class="no-participants">{ NO_PARTICIPANTS }</p> },
        Roster::Members(rows) => html! {
            <ul class="participants-list">
              { for rows.iter().map(|row| participant_row(row, &props.on_remove)) }
            </ul>
        },
    };

    html! {
      <div class="activity-card">
        <h4>{ card.name.clone() }</h4>
        <p>{ card.description.clone() }</p>
        <p><strong>{ "Schedule:" }</strong>{ format!(" {}", card.schedule) }</p>
        <p><strong>{ "Availability:" }</strong>{ format!(" {}", card.availability) }</p>
        <div class="participants-section">
          <h5>{ "Participants" }</h5>
          { participants }
        </div>
      </div>
    }
}

fn participant_row(row: &ParticipantRow, on_remove: &Callback<ParticipantRow>) -> Html {
    let onclick = {
        let row = row.clone();
        on_remove.reform(move |_: MouseEvent| row.clone())
    };

    html! {
      <li class="participant">
        <span class="participant-name" title={row.email.clone()}>{ row.label.clone() }</span>
        <button class="delete-btn" title="Unregister"
                data-activity={row.activity.clone()} data-email={row.email.clone()}
                {onclick}>
          { "✕" }
        </button>
      </li>
    }
}
