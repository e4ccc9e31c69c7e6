mod components;
mod hooks;
mod pages;
mod transport;
pub mod utils;

use components::{Nav, ProtectedRoute};
use hooks::SessionProvider;
use pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, products::ProductsPage,
    sign_up::SignUpPage,
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    SignUp,
    // Older links still point here
    #[at("/singUp")]
    SignUpAlias,
    #[at("/products")]
    Products,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::SignUp => html! { <SignUpPage /> },
        Route::SignUpAlias => html! { <Redirect<Route> to={Route::SignUp} /> },
        Route::Products => html! { <ProductsPage /> },
        Route::Dashboard => html! {
            <ProtectedRoute>
                <DashboardPage />
            </ProtectedRoute>
        },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{ "Página no encontrada" }</h1>
                <Link<Route> to={Route::Home}>{ "Volver al inicio" }</Link<Route>>
            </div>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <Nav />
                <main class="app-main">
                    <Switch<Route> render={switch} />
                </main>
            </SessionProvider>
        </BrowserRouter>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
