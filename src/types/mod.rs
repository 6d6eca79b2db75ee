pub use self::route_params::RouteParams;

mod route_params;
