//! Public product table with client-side filters.

use crate::transport;
use crate::utils;
use shared::listing::category_names;
use shared::{endpoints, ApiRequest, ProductFilter, ProductListing};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum Catalog {
    Loading,
    Loaded(Vec<ProductListing>),
    Failed(String),
}

#[function_component(ProductsPage)]
pub fn products_page() -> Html {
    let catalog = use_state(|| Catalog::Loading);
    let filter = use_state(ProductFilter::default);

    {
        let catalog = catalog.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let request = ApiRequest::get(endpoints::PRODUCTS);
                match transport::client().fetch::<Vec<ProductListing>>(&request).await {
                    Ok(products) => catalog.set(Catalog::Loaded(products)),
                    Err(e) => catalog.set(Catalog::Failed(e.user_message())),
                }
            });
            || ()
        });
    }

    // Each filter input rewrites one field of the filter
    let edit = |apply: fn(&mut ProductFilter, String)| {
        let filter = filter.clone();
        move |value: String| {
            let mut next = (*filter).clone();
            apply(&mut next, value);
            filter.set(next);
        }
    };
    let on_name = {
        let edit = edit(|f, v| f.name = v);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let on_min = {
        let edit = edit(|f, v| f.min_price = v);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let on_max = {
        let edit = edit(|f, v| f.max_price = v);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let on_category = {
        let edit = edit(|f, v| f.category = v);
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit(select.value());
        })
    };

    let body = match &*catalog {
        Catalog::Loading => html! { <p class="loading">{ "Cargando productos..." }</p> },
        Catalog::Failed(message) => html! { <p class="result error">{ format!("❌ {}", message) }</p> },
        Catalog::Loaded(products) => {
            let rows = filter.apply(products);
            if rows.is_empty() {
                html! { <p class="empty-state">{ "No hay productos que coincidan con los filtros." }</p> }
            } else {
                html! {
                    <table class="product-table">
                        <thead>
                            <tr>
                                <th>{ "ID" }</th>
                                <th>{ "Nombre" }</th>
                                <th>{ "Descripción" }</th>
                                <th>{ "Precio" }</th>
                                <th>{ "Categoría" }</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for rows.into_iter().map(|p| html! {
                                <tr key={p.product_id.to_string()}>
                                    <td>{ p.product_id }</td>
                                    <td>{ p.product_name.clone() }</td>
                                    <td>{ p.description.clone() }</td>
                                    <td>{ utils::format_price(p.price) }</td>
                                    <td>{ p.category_name.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                }
            }
        }
    };

    let categories = match &*catalog {
        Catalog::Loaded(products) => category_names(products),
        _ => Vec::new(),
    };

    html! {
        <div class="products-container">
            <h1>{ "Productos" }</h1>
            <div class="filter-bar">
                <input
                    type="text"
                    placeholder="Buscar por nombre"
                    value={filter.name.clone()}
                    oninput={on_name}
                />
                <select onchange={on_category}>
                    <option value="" selected={filter.category.is_empty()}>
                        { "Todas las categorías" }
                    </option>
                    { for categories.into_iter().map(|name| {
                        let selected = filter.category == name;
                        html! { <option value={name.clone()} {selected}>{ name }</option> }
                    }) }
                </select>
                <input
                    type="number"
                    placeholder="Precio mínimo"
                    value={filter.min_price.clone()}
                    oninput={on_min}
                />
                <input
                    type="number"
                    placeholder="Precio máximo"
                    value={filter.max_price.clone()}
                    oninput={on_max}
                />
            </div>
            { body }
        </div>
    }
}
