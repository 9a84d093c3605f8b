//! 解析履歴コンポーネント

use doc_verify_common::HistoryEntry;
use leptos::prelude::*;

#[component]
pub fn HistoryPanel(#[prop(into)] history: Signal<Vec<HistoryEntry>>) -> impl IntoView {
    view! {
        <Show when=move || history.with(|h| !h.is_empty())>
            <section class="history">
                <h2>{move || format!("履歴 — {}件", history.with(Vec::len))}</h2>
                <div class="history-list">
                    <For
                        each=move || history.get()
                        key=|entry| entry.id.clone()
                        children=move |entry| view! { <HistoryCard entry=entry /> }
                    />
                </div>
            </section>
        </Show>
    }
}

/// 判定結果に応じた状態表示のクラス
fn status_class(entry: &HistoryEntry) -> &'static str {
    match entry.result.is_valid() {
        Some(true) => "status-dot valid",
        Some(false) => "status-dot invalid",
        None => "status-dot unknown",
    }
}

#[component]
fn HistoryCard(entry: HistoryEntry) -> impl IntoView {
    let dot = status_class(&entry);
    let time = entry.local_time_label();
    let json = entry.result.to_pretty_json();
    let has_context = entry.has_context();

    let document = match entry.preview.clone() {
        Some(preview) => view! {
            <img class="history-preview" src=preview alt=entry.file_name.clone() />
        }
        .into_any(),
        None => view! {
            <div class="history-placeholder">
                <span class="file-icon">"📄"</span>
                <span class="text-muted">{entry.file_name.clone()}</span>
            </div>
        }
        .into_any(),
    };

    let name = entry.name.clone().map(|name| {
        view! {
            <p><span class="label">"氏名: "</span>{name}</p>
        }
    });
    let national_id = entry.national_id.clone().map(|id| {
        view! {
            <p><span class="label">"CPF: "</span>{id}</p>
        }
    });
    let prompt = entry.prompt.clone().map(|prompt| {
        view! {
            <div class="history-prompt">
                <hr />
                <p class="label">"プロンプト:"</p>
                <p>{prompt}</p>
            </div>
        }
    });

    view! {
        <article class="history-card">
            <div class="history-card-header">
                <span class=dot></span>
                <span class="file-name">{entry.file_name.clone()}</span>
                <span class="text-muted">{time}</span>
            </div>
            <div class="history-card-body">
                <div class="history-document">{document}</div>
                <div class="history-context">
                    {name}
                    {national_id}
                    {prompt}
                    {(!has_context).then(|| view! { <p class="text-muted">"追加の文脈なし"</p> })}
                </div>
            </div>
            <div class="history-response">
                <p class="label">"APIレスポンス:"</p>
                <pre>{json}</pre>
            </div>
        </article>
    }
}
