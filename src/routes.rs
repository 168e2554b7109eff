use std::collections::HashMap;

use crate::database::Database;
use crate::{
    errors,
    http::{Request, Response},
};
use errors::{Error, Result};
use matchit::Router;

/// Utility macro generating a constant for the HTTP endpoint, and associate
/// it with an identifier. Matchit requires both
macro_rules! make_paths {
        ($($name:ident: $path:expr,)*) => {

        pub mod paths {
                    $(
                        pub const $name: &str = $path;
                    )*
        }
        pub mod endpoints {
            $(
                pub const $name: &str = stringify!($name);
            )*
        }

        }
    }

make_paths! {
    FOODS: "/foods",
    FOOD_BY_ID: "/foods/{food_id}",
    FAVORITES: "/favorites",
    FAVORITE_BY_ID: "/favorites/{food_id}",
    ORDERS: "/orders",
}

/// Utility to add a list of paths to the router automatically
macro_rules! add_path{
    ($router:ident $(, $path:ident)*) => {
        $(
            $router.insert(paths::$path, endpoints::$path)?;
        )*
    }
}

/// Names of the parameters in the HTTP paths, used to extract them
/// from the parameters inside of request handling
pub mod params {
    /// Key of food ids in HTTP paths
    pub const FOOD_ID: &str = "food_id";
}

/// Return the HTTP path for a food based on its id
pub fn food_by_id(food_id: u64) -> String {
    paths::FOOD_BY_ID.replace("{food_id}", &food_id.to_string())
}

/// Return the HTTP path for a favorite based on the id of the food
pub fn favorite_by_id(food_id: u64) -> String {
    paths::FAVORITE_BY_ID.replace("{food_id}", &food_id.to_string())
}

/// Return the favorites path filtered down to the given food id
///
/// The filter travels as a query string, the way the original backend
/// exposes it, not as a path segment
pub fn favorites_matching(food_id: u64) -> String {
    format!("{}?id={}", paths::FAVORITES, food_id)
}

// spurious warning, I am using this in tests
#[allow(unused_macros)]
/// Utility to create easily hashmaps of parameters for testing
macro_rules! make_params {
    () => {
        std::collections::HashMap::new()
    };
    ($name:ident: $value:expr $(, $name2:ident: $value2:expr)* ) => {
        {
            let mut map = std::collections::HashMap::new();
            map.insert(params::$name.to_string(), $value.to_string());
            $(
                map.insert(params::$name2.to_string(), $value2.to_string());
            )*
            map
        }
        }
    }

#[allow(unused_imports)]
pub(crate) use make_params;

/// Create a new router with the paths defined in this module
///
/// Errors from this function are programming errors, most likely stemming
/// from a misuse of matchit
fn new_router() -> errors::Result<Router<&'static str>> {
    let mut router = Router::new();
    add_path!(
        router,
        FOODS,
        FOOD_BY_ID,
        FAVORITES,
        FAVORITE_BY_ID,
        ORDERS
    );
    Ok(router)
}

/// Type of the object containing the HTTP path parameters passed to handlers
pub type HttpParams = HashMap<String, String>;
/// Type of the function that handles HTTP requests
pub type HttpHandler = fn(Request, HttpParams, &mut dyn Database) -> Result<Response>;

/// The router is in charge of taking in raw HTTP requests and to dispatch
/// them to the appropriate handler function.
pub struct HttpRouter {
    routes: Router<&'static str>,
    handlers: HashMap<&'static str, HashMap<&'static str, HttpHandler>>,
}

impl HttpRouter {
    /// Creates a new empty router
    ///
    /// Although the matchit router is not empty, there are no methods
    /// associated to the routes yet, so no request can be processed.
    /// Errors in this function are programming errors.
    pub fn new() -> Result<Self> {
        let routes = new_router()?;
        Ok(HttpRouter {
            routes,
            handlers: HashMap::new(),
        })
    }

    /// Add a new route to the router
    pub fn add_route(&mut self, method: &'static str, route: &'static str, handler: HttpHandler) {
        self.handlers
            .entry(route)
            .or_default()
            .insert(method, handler);
    }

    /// Sends a request to the appropriate handler if it exists
    ///
    /// Matching ignores the query string, handlers read it off the request
    /// themselves. If there is a route matching the request, its handler
    /// will be called and the result of the function will be the result of
    /// the handler. If no route is defined for this request, return
    /// Error::NotFound
    ///
    /// Checking that all parameters are present and that the body is correct
    /// is the responsibility of the handler
    pub fn route(&self, request: Request, db: &mut dyn Database) -> Result<Response> {
        let (handler, params) = self.lookup(request.route_path(), &request.method)?;
        handler(request, params, db)
    }

    /// Resolve a path and method down to a handler and the path parameters
    fn lookup(&self, path: &str, method: &str) -> Result<(HttpHandler, HttpParams)> {
        let route = self
            .routes
            .at(path)
            .map_err(|err| errors::Error::NotFound(err.to_string()))?;

        let handler = self
            .handlers
            .get(route.value)
            .and_then(|methods| methods.get(method))
            .ok_or_else(|| Error::NotFound(format!("No handler for {} {}", method, route.value)))?;

        let params = route
            .params
            .iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Ok((*handler, params))
    }
}
