mod api;
mod http_error;
mod views;

use self::api::{ApiErrorResponse, CreatedRun};
use self::http_error::HttpError;
use crate::database::{StoreError, StoreHandle, ValidationErrors};
use crate::service::{self, ApiError, RunForm, Submission};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, ContentType};
use actix_web::middleware::{Compress, Logger};
use actix_web::web::{self, Bytes, Data, Form, Path, ServiceConfig};
use actix_web::{App, Error, HttpResponse, HttpServer};
use log::{debug, error, info};
use maud::Markup;

type StoreData = Data<StoreHandle>;
type PageResult = Result<HttpResponse, HttpError>;

fn render(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(markup.into_string())
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

async fn list_runs(store: StoreData) -> PageResult {
    let runs = service::list_runs(&mut **store.lock())?;
    Ok(render(views::run_list(&runs)))
}

async fn create_form() -> HttpResponse {
    render(views::run_form(
        "Record a run",
        &RunForm::default(),
        &ValidationErrors::default(),
    ))
}

async fn create_submit(store: StoreData, form: Form<RunForm>) -> PageResult {
    let submission = service::create_run(&mut **store.lock(), &form)?;
    Ok(match submission {
        Submission::Saved(_) => redirect_to_list(),
        Submission::Rejected(errors) => render(views::run_form("Record a run", &form, &errors)),
    })
}

async fn update_form(id: Path<i32>, store: StoreData) -> PageResult {
    let run = service::get_run(&mut **store.lock(), id.into_inner())?;
    Ok(render(views::run_form(
        &format!("Edit run {}", run.id),
        &RunForm::from_run(&run),
        &ValidationErrors::default(),
    )))
}

async fn update_submit(id: Path<i32>, store: StoreData, form: Form<RunForm>) -> PageResult {
    let id = id.into_inner();
    let submission = service::update_run(&mut **store.lock(), id, &form)?;
    Ok(match submission {
        Submission::Saved(_) => redirect_to_list(),
        Submission::Rejected(errors) => {
            render(views::run_form(&format!("Edit run {id}"), &form, &errors))
        }
    })
}

async fn delete_confirm(id: Path<i32>, store: StoreData) -> PageResult {
    let run = service::get_run(&mut **store.lock(), id.into_inner())?;
    Ok(render(views::confirm_delete(&run)))
}

async fn delete_submit(id: Path<i32>, store: StoreData) -> PageResult {
    service::delete_run(&mut **store.lock(), id.into_inner())?;
    Ok(redirect_to_list())
}

async fn report(id: Path<i32>, store: StoreData) -> PageResult {
    let run = service::get_run(&mut **store.lock(), id.into_inner())?;
    Ok(render(views::report(&run)))
}

fn api_error(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiErrorResponse { error })
}

// Every failure gets the same 400 response, only the logging differs
async fn create_run_api(store: StoreData, body: Result<Bytes, Error>) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            debug!("Failed to read API run payload: {err}");
            return api_error(err.to_string());
        }
    };

    let result = service::create_run_from_payload(&mut **store.lock(), &body);
    match result {
        Ok(run) => HttpResponse::Created().json(CreatedRun { id: run.id }),
        Err(err) => {
            match &err {
                ApiError::Malformed(_)
                | ApiError::Invalid(_)
                | ApiError::Store(StoreError::Validation(_)) => {
                    debug!("Rejected API run payload: {err}");
                }
                ApiError::Store(StoreError::NotFound(_) | StoreError::Database(_)) => {
                    error!("Failed to create run from API payload: {err}");
                }
            }
            api_error(err.to_string())
        }
    }
}

/// Register every route of the application
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(list_runs)))
        .service(
            web::resource("/create/")
                .route(web::get().to(create_form))
                .route(web::post().to(create_submit)),
        )
        .service(
            web::resource("/update/{id}/")
                .route(web::get().to(update_form))
                .route(web::post().to(update_submit)),
        )
        .service(
            web::resource("/delete/{id}/")
                .route(web::get().to(delete_confirm))
                .route(web::post().to(delete_submit)),
        )
        .service(web::resource("/api/run/").route(web::post().to(create_run_api)))
        .service(web::resource("/report/{id}/").route(web::get().to(report)));
}

/// Build the application around a run store
pub fn create_app(
    store: StoreHandle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(Data::new(store))
        .wrap(Compress::default())
        .wrap(Logger::default())
        .configure(configure)
}

pub async fn start_server(store: StoreHandle, host: &str, port: u16) -> std::io::Result<()> {
    info!("Starting HTTP server on {host}:{port}");
    HttpServer::new(move || create_app(store.clone()))
        .bind((host, port))?
        .run()
        .await
}
