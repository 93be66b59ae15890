use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// Routes the coordinator navigates to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Login entry point; receives the `returnTo` query parameter
    #[serde(default = "default_login")]
    pub login: String,

    /// Where a replayed add-to-cart lands
    #[serde(default = "default_cart")]
    pub cart: String,

    /// Where a replayed buy-now lands (hard navigation)
    #[serde(default = "default_checkout")]
    pub checkout: String,

    #[serde(default = "default_orders")]
    pub orders: String,

    #[serde(default = "default_profile")]
    pub profile: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            cart: default_cart(),
            checkout: default_checkout(),
            orders: default_orders(),
            profile: default_profile(),
        }
    }
}

impl RouteConfig {
    /// Load route configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(login) = get_env_with_prefix("ROUTE_LOGIN") {
            config.login = login;
        }
        if let Some(cart) = get_env_with_prefix("ROUTE_CART") {
            config.cart = cart;
        }
        if let Some(checkout) = get_env_with_prefix("ROUTE_CHECKOUT") {
            config.checkout = checkout;
        }
        if let Some(orders) = get_env_with_prefix("ROUTE_ORDERS") {
            config.orders = orders;
        }
        if let Some(profile) = get_env_with_prefix("ROUTE_PROFILE") {
            config.profile = profile;
        }

        config
    }
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_cart() -> String {
    "/cart".to_string()
}

fn default_checkout() -> String {
    "/checkout?directBuy=true".to_string()
}

fn default_orders() -> String {
    "/orders".to_string()
}

fn default_profile() -> String {
    "/profile".to_string()
}
