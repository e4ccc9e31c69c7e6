use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="home-container">
            <h1>{ "Catálogo de productos" }</h1>
            <p>{ "Consulta el catálogo o administra categorías y productos." }</p>
            <div class="home-actions">
                <Link<Route> to={Route::Products} classes={classes!("primary-button")}>
                    { "Ver productos" }
                </Link<Route>>
                <Link<Route> to={Route::Dashboard} classes={classes!("secondary-button")}>
                    { "Panel de administración" }
                </Link<Route>>
            </div>
        </div>
    }
}
