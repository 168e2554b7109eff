use crate::api::{Food, NewOrder};
use crate::database::Database;
use crate::errors::{Error, Result};
use crate::http::{Request, Response};
use crate::routes::*;

/// Build the router for the whole API surface the app talks to
pub fn create_http_router() -> Result<HttpRouter> {
    let mut router = HttpRouter::new()?;

    router.add_route("GET", endpoints::FOODS, get_foods);
    router.add_route("GET", endpoints::FOOD_BY_ID, get_food);
    router.add_route("GET", endpoints::FAVORITES, get_favorites);
    router.add_route("POST", endpoints::FAVORITES, post_favorite);
    router.add_route("DELETE", endpoints::FAVORITE_BY_ID, delete_favorite);
    router.add_route("POST", endpoints::ORDERS, post_order);

    Ok(router)
}

/// Route a request and turn handler failures into HTTP error responses
///
/// Handlers report routing and validation problems through the crate error
/// type; anything else is a server-side failure the client only sees as
/// a 500.
pub fn dispatch(router: &HttpRouter, request: Request, db: &mut dyn Database) -> Response {
    let method = request.method.clone();
    let path = request.path.clone();

    let response = match router.route(request, db) {
        Ok(response) => response,
        Err(err) => match err.downcast_ref::<Error>() {
            Some(Error::NotFound(_)) => Response::not_found(),
            Some(Error::BadRequest(_)) => Response::error(400),
            _ => {
                tracing::error!("handler failure on {} {}: {}", method, path, err);
                Response::internal_server_error()
            }
        },
    };

    tracing::info!("{} {} -> {}", method, path, response.status.unwrap_or(500));
    response
}

/// Extract and parse the food id segment of the matched path
fn food_id_param(params: &HttpParams) -> Result<u64> {
    let food_id = params
        .get(params::FOOD_ID)
        .ok_or(Error::BadRequest("Missing food_id".to_string()))
        .and_then(|id| {
            id.parse::<u64>()
                .map_err(|err| Error::BadRequest(err.to_string()))
        })?;
    Ok(food_id)
}

fn get_foods(_: Request, _: HttpParams, db: &mut dyn Database) -> Result<Response> {
    let foods = db.list_foods()?;
    Ok(Response::ok_with_body(serde_json::to_string(&foods)?))
}

fn get_food(_: Request, params: HttpParams, db: &mut dyn Database) -> Result<Response> {
    let food = db.get_food(food_id_param(&params)?)?;
    Ok(Response::ok_with_body(serde_json::to_string(&food)?))
}

/// List favorites, filtered down to a single food id when the query string
/// carries one. `GET /favorites?id={id}` is how the app asks whether one
/// food is favorited.
fn get_favorites(request: Request, _: HttpParams, db: &mut dyn Database) -> Result<Response> {
    let query = request.query_params();
    let favorites = match query.get("id") {
        Some(id) => {
            let id = id
                .parse::<u64>()
                .map_err(|err| Error::BadRequest(err.to_string()))?;
            db.favorites_matching(id)?
        }
        None => db.list_favorites()?,
    };

    Ok(Response::ok_with_body(serde_json::to_string(&favorites)?))
}

fn post_favorite(request: Request, _: HttpParams, db: &mut dyn Database) -> Result<Response> {
    let food = serde_json::from_str::<Food>(&request.body)
        .map_err(|err| Error::BadRequest(err.to_string()))?;

    db.insert_favorite(food.clone())?;
    Ok(Response::created(serde_json::to_string(&food)?))
}

fn delete_favorite(_: Request, params: HttpParams, db: &mut dyn Database) -> Result<Response> {
    db.remove_favorite(food_id_param(&params)?)?;
    Ok(Response::ok())
}

fn post_order(request: Request, _: HttpParams, db: &mut dyn Database) -> Result<Response> {
    let new_order = serde_json::from_str::<NewOrder>(&request.body)
        .map_err(|err| Error::BadRequest(err.to_string()))?;

    let order = db.insert_order(new_order)?;
    Ok(Response::created(serde_json::to_string(&order)?))
}
