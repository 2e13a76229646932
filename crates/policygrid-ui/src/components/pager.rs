use policygrid_core::grid::PAGE_SIZE_CHOICES;
use web_sys::HtmlSelectElement;
use yew::{
  Callback,
  Event,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PagerProps {
  pub page:         u64,
  pub page_count:   u64,
  pub page_size:    u64,
  pub range_label:  String,
  pub on_page:      Callback<u64>,
  pub on_page_size: Callback<u64>
}

#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
  let last =
    props.page_count.saturating_sub(1);
  let at_start = props.page == 0;
  let at_end = props.page >= last;

  let go = |target: u64| {
    let on_page = props.on_page.clone();
    move |_: MouseEvent| {
      on_page.emit(target)
    }
  };

  let on_size = {
    let on_page_size =
      props.on_page_size.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Ok(size) =
        select.value().parse::<u64>()
      {
        on_page_size.emit(size);
      }
    })
  };

  let prev = props.page.saturating_sub(1);
  let next = props
    .page
    .saturating_add(1)
    .min(last);

  html! {
      <div class="pager">
          <label>
              { "Page Size: " }
              <select onchange={on_size}>
                  {
                      for PAGE_SIZE_CHOICES.iter().map(|size| html! {
                          <option
                              value={size.to_string()}
                              selected={*size == props.page_size}
                          >
                              { *size }
                          </option>
                      })
                  }
              </select>
          </label>
          <span>{ &props.range_label }</span>
          <button disabled={at_start} onclick={go(0)}>{ "«" }</button>
          <button disabled={at_start} onclick={go(prev)}>{ "‹" }</button>
          <span>{ format!("Page {} of {}", props.page + 1, props.page_count) }</span>
          <button disabled={at_end} onclick={go(next)}>{ "›" }</button>
          <button disabled={at_end} onclick={go(last)}>{ "»" }</button>
      </div>
  }
}
