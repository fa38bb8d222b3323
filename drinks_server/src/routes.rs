//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module
//! neat and tidy 🙏
//!
//! Each route declares the permission it requires (or none, for public routes) at its
//! registration site. The `route!` macro attaches a [`RequirePermissionFactory`] guard to
//! protected routes, so the handler body only ever runs for a request whose token has already
//! been verified and authorized.

use actix_web::{get, web, HttpResponse, Responder};
use drinks_engine::{
    db_types::{Drink, NewDrink},
    DrinkApi,
};
use log::*;

use crate::{
    data_objects::{DeleteResponse, DrinkList},
    errors::ServerError,
};
use drinks_engine::traits::DrinkManagement;

// Web-actix cannot handle generics in handlers, so routes are registered manually using the
// `route!` macro.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $bound:ty) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>); }
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $bound + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $bound:ty where requires $permission:literal) => {
        paste::paste! { pub struct [<$name:camel Route>]<A, V>(core::marker::PhantomData<fn() -> (A, V)>); }
        paste::paste! { impl<A, V> [<$name:camel Route>]<A, V> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData)
            }
        }}
        paste::paste! { impl<A, V> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A, V>
        where
            A: $bound + 'static,
            V: $crate::auth::TokenVerifier + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::RequirePermissionFactory::<V>::new($permission));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Drinks  ----------------------------------------------------

route!(drinks => Get "/drinks" impl DrinkManagement);
/// Route handler for the public menu listing.
///
/// Returns every drink in ascending id order, in the short projection: ingredient names are
/// hidden, only colours and relative quantities are exposed. No authentication required.
pub async fn drinks<B: DrinkManagement>(api: web::Data<DrinkApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET all drinks");
    let drinks = api.fetch_all_drinks().await?;
    let menu = drinks.iter().map(Drink::summary).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(DrinkList::new(menu)))
}

route!(drinks_detail => Get "/drinks-detail" impl DrinkManagement where requires "get:drinks-detail");
/// Route handler for the full menu listing.
///
/// Same ordering as `/drinks`, but in the long projection, including ingredient names. Requires
/// the `get:drinks-detail` permission.
pub async fn drinks_detail<B: DrinkManagement>(api: web::Data<DrinkApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET all drinks (detail)");
    let drinks = api.fetch_all_drinks().await?;
    Ok(HttpResponse::Ok().json(DrinkList::new(drinks)))
}

route!(create_drink => Post "/drinks" impl DrinkManagement where requires "post:drinks");
/// Route handler for creating a new drink.
///
/// The body must contain a non-empty `title` and a `recipe` with at least one ingredient; the
/// store assigns the id. The created record is returned in the long projection, wrapped in a
/// one-element list. Requires the `post:drinks` permission.
pub async fn create_drink<B: DrinkManagement>(
    body: web::Json<NewDrink>,
    api: web::Data<DrinkApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let drink = body.into_inner();
    drink.validate().map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    let created = api.create_drink(drink).await?;
    info!("💻️ Created drink '{}' with id {}", created.title, created.id);
    Ok(HttpResponse::Ok().json(DrinkList::new(vec![created])))
}

route!(update_drink => Patch "/drinks/{id}" impl DrinkManagement where requires "patch:drinks");
/// Route handler for replacing an existing drink.
///
/// Despite the PATCH verb, this is a wholesale replace: the body is validated exactly like a
/// create, and both title and recipe are overwritten. Responds 404 when the id is unknown.
/// Requires the `patch:drinks` permission.
pub async fn update_drink<B: DrinkManagement>(
    path: web::Path<i64>,
    body: web::Json<NewDrink>,
    api: web::Data<DrinkApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let drink = body.into_inner();
    drink.validate().map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    let updated = api
        .update_drink(id, drink)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No drink with id {id}")))?;
    info!("💻️ Replaced drink {id} with '{}'", updated.title);
    Ok(HttpResponse::Ok().json(DrinkList::new(vec![updated])))
}

route!(delete_drink => Delete "/drinks/{id}" impl DrinkManagement where requires "delete:drinks");
/// Route handler for removing a drink from the menu.
///
/// Responds 404 when the id is unknown. On success, returns the bare id of the deleted record
/// rather than a list. Requires the `delete:drinks` permission.
pub async fn delete_drink<B: DrinkManagement>(
    path: web::Path<i64>,
    api: web::Data<DrinkApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let deleted = api
        .delete_drink(id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No drink with id {id}")))?;
    info!("💻️ Deleted drink {deleted}");
    Ok(HttpResponse::Ok().json(DeleteResponse::new(deleted)))
}

/// Fallback for requests that match no registered route.
pub async fn not_found() -> Result<HttpResponse, ServerError> {
    Err(ServerError::NoRecordFound("resource not found".to_string()))
}
