//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<F>(#[prop(into)] has_history: Signal<bool>, on_clear_history: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <div>
                <h1>"書類検証"</h1>
                <p class="text-muted">"RG・CNHの画像またはPDFをAIで検証します"</p>
            </div>
            <Show when=move || has_history.get()>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click={
                        let on_clear_history = on_clear_history.clone();
                        move |_| on_clear_history(())
                    }
                >
                    "履歴を削除"
                </button>
            </Show>
        </header>
    }
}
