use web_sys::HtmlInputElement;
use yew::{
  AttrValue,
  Callback,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SearchBoxProps {
  #[prop_or(AttrValue::Static("Search..."))]
  pub placeholder: AttrValue,
  pub on_change:   Callback<String>
}

#[function_component(SearchBox)]
pub fn search_box(
  props: &SearchBoxProps
) -> Html {
  let on_change = props.on_change.clone();
  let oninput =
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(input.value());
    });

  html! {
      <input
          type="text"
          class="search-input"
          placeholder={props.placeholder.clone()}
          {oninput}
      />
  }
}
