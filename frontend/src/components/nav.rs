use crate::hooks::use_session;
use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Nav)]
pub fn nav() -> Html {
    let session = use_session();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.logout())
    };

    html! {
        <nav class="top-nav">
            <Link<Route> to={Route::Home} classes={classes!("nav-brand")}>{ "Catálogo" }</Link<Route>>
            <div class="nav-links">
                <Link<Route> to={Route::Products}>{ "Productos" }</Link<Route>>
                <Link<Route> to={Route::Dashboard}>{ "Admin" }</Link<Route>>
                if session.is_authenticated() {
                    <button class="header-button logout" onclick={on_logout}>
                        { "Cerrar sesión" }
                    </button>
                } else {
                    <Link<Route> to={Route::Login}>{ "Iniciar sesión" }</Link<Route>>
                    <Link<Route> to={Route::SignUp}>{ "Crear usuario" }</Link<Route>>
                }
            </div>
        </nav>
    }
}
