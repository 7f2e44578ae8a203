// apiserver.rs

use askama::Template;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Response, StatusCode, header},
    response::{Html, IntoResponse},
    routing::*,
};
pub use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;

use crate::*;

pub async fn run_api_server(state: Arc<WorkshopState>) -> anyhow::Result<()> {
    let listen = format!("0.0.0.0:{}", state.settings.port);
    let addr = listen.parse::<net::SocketAddr>()?;

    let app = Router::new()
        .route("/", get(get_guide))
        .route("/config", get(get_config_page))
        .route("/math", get(get_math_page))
        .route("/troubleshooting", get(get_troubleshooting_page))
        .route("/index.css", get(get_indexcss))
        .route("/form.js", get(get_formjs))
        .route("/api/progress", get(get_progress))
        .route("/api/convert", get(get_convert))
        .route("/api/artifacts", get(get_artifacts))
        .route("/api/steps/reset", post(reset_steps))
        .route("/api/steps/:id", post(toggle_step))
        .route("/api/steps/:id/complete", post(complete_step))
        .route("/api/cards/reset", post(reset_cards))
        .route("/api/cards/:id", post(toggle_card))
        .route("/api/config", get(get_config).post(post_config))
        .route("/api/config/reset", post(reset_config))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening to {listen}");
    Ok(axum::serve(listener, app.into_make_service()).await?)
}

#[derive(Debug, Deserialize)]
pub struct GuideQuery {
    mode: Option<String>,
    step: Option<String>,
    debug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    debug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    adc: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleQuery {
    advance: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    pub done: bool,
    pub advance_to: Option<String>,
}

#[derive(Clone, Copy)]
struct StepView {
    number: usize,
    id: &'static str,
    phase: &'static str,
    title: &'static str,
    summary: &'static str,
    details: &'static [&'static str],
    visual: &'static str,
    snippet: &'static str,
    snippet_lang: &'static str,
    concept: &'static str,
    terms: &'static [&'static str],
    instructor_notes: &'static [&'static str],
    done: bool,
    open: bool,
    has_cards: bool,
}

#[derive(Clone)]
struct CardView {
    id: &'static str,
    title: &'static str,
    objective: &'static str,
    stub: &'static str,
    done_when: &'static [&'static str],
    hints: &'static [&'static str],
    done: bool,
}

#[derive(Template)]
#[template(path = "guide.html")]
struct GuideTmpl {
    nav: &'static str,
    instructor: bool,
    mode: ViewMode,
    completed: usize,
    total: usize,
    percent: u32,
    steps: Vec<StepView>,
    active: StepView,
    prev_id: &'static str,
    at_first: bool,
    at_last: bool,
    cards: Vec<CardView>,
    cards_total: usize,
    cards_completed: usize,
    cards_percent: u32,
}

#[derive(Template)]
#[template(path = "config.html")]
struct ConfigTmpl {
    nav: &'static str,
    config: WorkshopConfig,
    firmware: String,
    hass_yaml: String,
    commands: String,
}

#[derive(Template)]
#[template(path = "math.html")]
struct MathTmpl {
    nav: &'static str,
    adc: i32,
    voltage: String,
    resistance: String,
    temperature: String,
}

#[derive(Template)]
#[template(path = "troubleshooting.html")]
struct TroubleshootingTmpl {
    nav: &'static str,
    instructor: bool,
    diagnostics: &'static str,
}

fn instructor_on(state: &WorkshopState, debug: Option<&str>) -> bool {
    state.settings.instructor || debug == Some("1")
}

fn visual_kind(step: &Step) -> &'static str {
    match step.visual {
        Some(Visual::IdeFlow) => "ide",
        Some(Visual::Blink) => "blink",
        Some(Visual::Breadboard) => "breadboard",
        Some(Visual::Serial) => "serial",
        None => "",
    }
}

fn step_view(idx: usize, step: &'static Step, done: bool, open: bool) -> StepView {
    let (snippet_lang, snippet) = step_snippet(step.id).unwrap_or(("plaintext", ""));
    let note = learning_note(step.id);
    StepView {
        number: idx + 1,
        id: step.id,
        phase: step.phase,
        title: step.title,
        summary: step.summary,
        details: step.details,
        visual: visual_kind(step),
        snippet,
        snippet_lang,
        concept: note.map(|n| n.concept).unwrap_or(""),
        terms: note.map(|n| n.terms).unwrap_or(&[]),
        instructor_notes: instructor_notes(step.id),
        done,
        open,
        has_cards: step.id == "mqtt_flash",
    }
}

fn render_page<T: Template>(tmpl: &T) -> Response<Body> {
    match tmpl.render() {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => {
            let err_msg = format!("Template error: {e:?}\n");
            error!("{err_msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, err_msg).into_response()
        }
    }
}

pub async fn get_guide(
    State(state): State<Arc<WorkshopState>>,
    Query(q): Query<GuideQuery>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_guide()");

    let mode = ViewMode::from_query(q.mode.as_deref());
    let active_idx = sanitize_index(q.step.as_deref());

    let checklist = state.checklist.read().await.clone();
    let card_state = state.code_cards.read().await.clone();

    let steps: Vec<StepView> = STEPS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let done = checklist.get(s.id).copied().unwrap_or(false);
            step_view(i, s, done, i == active_idx)
        })
        .collect();

    let cards: Vec<CardView> = CODE_CARDS
        .iter()
        .map(|c| CardView {
            id: c.id,
            title: c.title,
            objective: c.objective,
            stub: c.stub,
            done_when: c.done_when,
            hints: c.hints,
            done: card_state.get(c.id).copied().unwrap_or(false),
        })
        .collect();

    let completed = checklist.values().filter(|v| **v).count();
    let cards_completed = card_state.values().filter(|v| **v).count();

    let tmpl = GuideTmpl {
        nav: "guide",
        instructor: instructor_on(&state, q.debug.as_deref()),
        mode,
        completed,
        total: STEPS.len(),
        percent: percent_of(completed, STEPS.len()),
        active: steps[active_idx].clone(),
        steps,
        prev_id: STEPS[prev_index(active_idx)].id,
        at_first: active_idx == 0,
        at_last: active_idx == STEPS.len() - 1,
        cards,
        cards_total: CODE_CARDS.len(),
        cards_completed,
        cards_percent: percent_of(cards_completed, CODE_CARDS.len()),
    };
    render_page(&tmpl)
}

pub async fn get_config_page(State(state): State<Arc<WorkshopState>>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_config_page()");

    let config = state.config.read().await.clone();
    let artifacts = match ArtifactSet::build(&config) {
        Ok(a) => a,
        Err(e) => {
            let err_msg = format!("Artifact template error: {e:?}\n");
            error!("{err_msg}");
            return (StatusCode::INTERNAL_SERVER_ERROR, err_msg).into_response();
        }
    };

    let tmpl = ConfigTmpl {
        nav: "config",
        config,
        firmware: artifacts.firmware,
        hass_yaml: artifacts.hass_yaml,
        commands: artifacts.commands,
    };
    render_page(&tmpl)
}

pub async fn get_math_page(
    State(state): State<Arc<WorkshopState>>,
    Query(q): Query<ConvertQuery>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_math_page()");

    let reading = convert(q.adc.unwrap_or(2048));
    let tmpl = MathTmpl {
        nav: "math",
        adc: reading.adc,
        voltage: format!("{:.3}", reading.voltage),
        resistance: format!("{:.3}", reading.resistance_kohm),
        temperature: format!("{:.2}", reading.temperature_c),
    };
    render_page(&tmpl)
}

pub async fn get_troubleshooting_page(
    State(state): State<Arc<WorkshopState>>,
    Query(q): Query<PageQuery>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_troubleshooting_page()");

    let tmpl = TroubleshootingTmpl {
        nav: "troubleshooting",
        instructor: instructor_on(&state, q.debug.as_deref()),
        diagnostics: INSTRUCTOR_DIAGNOSTICS_SNIPPET,
    };
    render_page(&tmpl)
}

pub async fn get_indexcss(State(state): State<Arc<WorkshopState>>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_indexcss()");

    let indexcss = include_bytes!("index.css");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        indexcss.to_vec(),
    )
        .into_response()
}

pub async fn get_formjs(State(state): State<Arc<WorkshopState>>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_formjs()");

    let formjs = include_bytes!("form.js");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/javascript")],
        formjs.to_vec(),
    )
        .into_response()
}

pub async fn get_progress(
    State(state): State<Arc<WorkshopState>>,
) -> (StatusCode, Json<ProgressView>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_progress()");
    (StatusCode::OK, Json(state.progress().await))
}

pub async fn get_convert(
    State(state): State<Arc<WorkshopState>>,
    Query(q): Query<ConvertQuery>,
) -> (StatusCode, Json<Reading>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_convert()");
    (StatusCode::OK, Json(convert(q.adc.unwrap_or(2048))))
}

pub async fn get_artifacts(State(state): State<Arc<WorkshopState>>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_artifacts()");

    let config = state.config.read().await.clone();
    match ArtifactSet::build(&config) {
        Ok(artifacts) => (StatusCode::OK, Json(artifacts)).into_response(),
        Err(e) => {
            let err_msg = format!("Artifact template error: {e:?}");
            error!("{err_msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, err_msg).into_response()
        }
    }
}

pub async fn toggle_step(
    State(state): State<Arc<WorkshopState>>,
    Path(id): Path<String>,
    Query(q): Query<ToggleQuery>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} toggle_step({id})");

    let Some(done) = state.toggle_step(&id).await else {
        return (StatusCode::NOT_FOUND, format!("unknown step {id}")).into_response();
    };

    // Completing a step in focus view advances to the next one; the
    // client applies the short delay before following the target.
    let advance_to = if done && q.advance.as_deref() == Some("1") {
        step_index(&id).and_then(advance_target).map(str::to_string)
    } else {
        None
    };

    (StatusCode::OK, Json(ToggleResponse { id, done, advance_to })).into_response()
}

pub async fn complete_step(
    State(state): State<Arc<WorkshopState>>,
    Path(id): Path<String>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} complete_step({id})");

    if state.complete_step(&id).await.is_none() {
        return (StatusCode::NOT_FOUND, format!("unknown step {id}")).into_response();
    }
    let advance_to = step_index(&id).and_then(advance_target).map(str::to_string);
    (
        StatusCode::OK,
        Json(ToggleResponse {
            id,
            done: true,
            advance_to,
        }),
    )
        .into_response()
}

pub async fn toggle_card(
    State(state): State<Arc<WorkshopState>>,
    Path(id): Path<String>,
) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} toggle_card({id})");

    match state.toggle_card(&id).await {
        Some(done) => (
            StatusCode::OK,
            Json(ToggleResponse {
                id,
                done,
                advance_to: None,
            }),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, format!("unknown card {id}")).into_response(),
    }
}

pub async fn reset_steps(State(state): State<Arc<WorkshopState>>) -> (StatusCode, String) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} reset_steps()");
    state.reset_steps().await;
    (StatusCode::OK, "OK".to_string())
}

pub async fn reset_cards(State(state): State<Arc<WorkshopState>>) -> (StatusCode, String) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} reset_cards()");
    state.reset_cards().await;
    (StatusCode::OK, "OK".to_string())
}

pub async fn get_config(
    State(state): State<Arc<WorkshopState>>,
) -> (StatusCode, Json<WorkshopConfig>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_config()");
    (StatusCode::OK, Json(state.config.read().await.clone()))
}

pub async fn post_config(
    State(state): State<Arc<WorkshopState>>,
    Json(config): Json<WorkshopConfig>,
) -> (StatusCode, String) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} post_config()");

    state.set_config(config).await;
    (StatusCode::OK, "OK".to_string())
}

pub async fn reset_config(State(state): State<Arc<WorkshopState>>) -> (StatusCode, String) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} reset_config()");

    state.reset_config().await;
    (StatusCode::OK, "OK".to_string())
}

// EOF
