//! Consec Solver HTTP Server

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::error;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use consec_solver::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct SectionData {
    grade: String,
    /// Height in mm
    h: f64,
    /// Width in mm
    b: f64,
    nh: usize,
    nb: usize,
}

#[derive(Debug, Deserialize)]
struct RebarData {
    name: String,
    grade: String,
    /// Diameter in mm
    diameter: f64,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct ShellData {
    grade: String,
    /// Thickness in mm
    h: f64,
    nh: usize,
}

#[derive(Debug, Deserialize)]
struct PlyData {
    name: String,
    grade: String,
    /// Bar diameter in mm
    diameter: f64,
    bars_per_m: f64,
    /// Depth in mm
    z: f64,
    /// Degrees from x
    #[serde(default)]
    angle: f64,
}

#[derive(Debug, Deserialize)]
struct SectionRequest {
    /// Material table (None = standard grades)
    #[serde(default)]
    materials: Option<MaterialTable>,
    #[serde(default)]
    section: Option<SectionData>,
    #[serde(default)]
    rebars: Vec<RebarData>,
    #[serde(default)]
    loads: Vec<SectionLoad>,
    load_combos: Vec<LoadCombination>,
    #[serde(default)]
    options: AnalysisOptions,
}

#[derive(Debug, Deserialize)]
struct ShellRequest {
    #[serde(default)]
    materials: Option<MaterialTable>,
    shell: ShellData,
    #[serde(default)]
    plies: Vec<PlyData>,
    #[serde(default)]
    loads: Vec<ShellLoad>,
    load_combos: Vec<LoadCombination>,
    #[serde(default)]
    options: AnalysisOptions,
}

#[derive(Debug, Serialize)]
struct ErrorData {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    combo: Option<String>,
}

impl From<&ConsecError> for ErrorData {
    fn from(e: &ConsecError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
            combo: e.combo().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct ComboOutcome<T> {
    combo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorData>,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<ComboOutcome<T>>>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn respond<T: Serialize>(
    outcome: ConsecResult<Vec<(String, ConsecResult<T>)>>,
) -> (StatusCode, Json<AnalysisResponse<T>>) {
    match outcome {
        Ok(results) => {
            let results: Vec<ComboOutcome<T>> = results
                .into_iter()
                .map(|(combo, result)| match result {
                    Ok(r) => ComboOutcome {
                        combo,
                        result: Some(r),
                        error: None,
                    },
                    Err(e) => ComboOutcome {
                        combo,
                        result: None,
                        error: Some(ErrorData::from(&e)),
                    },
                })
                .collect();
            (
                StatusCode::OK,
                Json(AnalysisResponse {
                    success: results.iter().all(|r| r.error.is_none()),
                    error: None,
                    results: Some(results),
                }),
            )
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(AnalysisResponse {
                success: false,
                error: Some(ErrorData::from(&e)),
                results: None,
            }),
        ),
    }
}

fn material_table(materials: Option<MaterialTable>) -> ConsecResult<Arc<MaterialTable>> {
    match materials {
        Some(table) => {
            table.validate()?;
            Ok(Arc::new(table))
        }
        None => Ok(Arc::new(MaterialTable::standard())),
    }
}

fn run_section(request: SectionRequest) -> ConsecResult<Vec<(String, ConsecResult<SectionResult>)>> {
    let mut model = FrameSectionModel::new(material_table(request.materials)?);
    if let Some(s) = request.section {
        model.set_section(RectangularSection::new(&s.grade, s.h, s.b, s.nh, s.nb)?)?;
    }
    for bar in request.rebars {
        model.add_rebar(Rebar::new(&bar.name, &bar.grade, bar.diameter, bar.x, bar.y)?)?;
    }
    for load in request.loads {
        model.add_load(load);
    }
    for combo in request.load_combos {
        model.add_load_combo(combo)?;
    }
    request.options.validate()?;
    Ok(model.analyze_all(&request.options))
}

fn run_shell(request: ShellRequest) -> ConsecResult<Vec<(String, ConsecResult<ShellResult>)>> {
    let mut model = ShellElementModel::new(material_table(request.materials)?);
    let s = request.shell;
    model.set_shell(LayeredShell::new(&s.grade, s.h, s.nh)?)?;
    for ply in request.plies {
        model.add_ply(Ply::new(
            &ply.name,
            &ply.grade,
            ply.diameter,
            ply.bars_per_m,
            ply.z,
            ply.angle,
        )?)?;
    }
    for load in request.loads {
        model.add_load(load);
    }
    for combo in request.load_combos {
        model.add_load_combo(combo)?;
    }
    request.options.validate()?;
    Ok(model.analyze_all(&request.options))
}

/// Run a batch on the blocking thread pool
async fn run_blocking<T, F>(run: F) -> (StatusCode, Json<AnalysisResponse<T>>)
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> ConsecResult<Vec<(String, ConsecResult<T>)>> + Send + 'static,
{
    match tokio::task::spawn_blocking(run).await {
        Ok(outcome) => respond(outcome),
        Err(e) => {
            error!("Analysis task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalysisResponse {
                    success: false,
                    error: None,
                    results: None,
                }),
            )
        }
    }
}

async fn analyze_section(Json(request): Json<SectionRequest>) -> impl IntoResponse {
    run_blocking(move || run_section(request)).await
}

async fn analyze_shell(Json(request): Json<ShellRequest>) -> impl IntoResponse {
    run_blocking(move || run_shell(request)).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/section/analyze", post(analyze_section))
        .route("/api/v1/shell/analyze", post(analyze_shell))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8086));
    println!("Consec Solver Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Section:      POST /api/v1/section/analyze");
    println!("  Shell:        POST /api/v1/shell/analyze");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
