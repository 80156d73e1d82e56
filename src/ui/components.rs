/// Reusable form components

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::notion::{Database, Workspace};

#[derive(Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&Workspace> for SelectOption {
    fn from(ws: &Workspace) -> Self {
        SelectOption {
            value: ws.id.clone(),
            label: ws.name.clone(),
        }
    }
}

impl From<&Database> for SelectOption {
    fn from(db: &Database) -> Self {
        SelectOption {
            value: db.id.clone(),
            label: db.title.clone(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub options: Vec<SelectOption>,
    pub selected: String,
    /// Label of the leading empty option
    pub placeholder: AttrValue,
    #[prop_or(false)]
    pub disabled: bool,
    pub onchange: Callback<String>,
}

/// Labelled `<select>` with an empty first option
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let select_ref = use_node_ref();

    // Options are replaced wholesale on refetch, so push the value back in
    {
        let select_ref = select_ref.clone();
        use_effect_with((props.selected.clone(), props.options.clone()), move |(selected, _)| {
            if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                select.set_value(selected);
            }
            || ()
        });
    }

    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                callback.emit(select.value());
            }
        })
    };

    html! {
        <div class="field">
            <label class="field-label" for={props.id.clone()}>{props.label.clone()}</label>
            <select
                id={props.id.clone()}
                class="field-select"
                ref={select_ref}
                disabled={props.disabled}
                {onchange}
            >
                <option value="" selected={props.selected.is_empty()}>{props.placeholder.clone()}</option>
                {for props.options.iter().map(|opt| html! {
                    <option key={opt.value.clone()} value={opt.value.clone()} selected={opt.value == props.selected}>
                        {&opt.label}
                    </option>
                })}
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub checked: bool,
    #[prop_or(false)]
    pub disabled: bool,
    pub onchange: Callback<bool>,
}

#[function_component(CheckboxField)]
pub fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                callback.emit(input.checked());
            }
        })
    };

    html! {
        <div class="field field-checkbox">
            <input
                type="checkbox"
                id={props.id.clone()}
                checked={props.checked}
                disabled={props.disabled}
                {onchange}
            />
            <label for={props.id.clone()}>{props.label.clone()}</label>
        </div>
    }
}
