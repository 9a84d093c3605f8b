//! メインアプリケーションコンポーネント

use crate::api::verify::FetchAnalyzer;
use crate::components::{
    header::Header, history_panel::HistoryPanel, identity_fields::IdentityFields,
    upload_area::{read_data_url, UploadArea},
};
use crate::config::build_config;
use crate::local_store::LocalStore;
use doc_verify_common::{
    AnalysisError, Analyzer, FormState, HistoryStore, KeyValueStore, Orchestrator, Phase,
    SelectedFile,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

#[component]
pub fn App() -> impl IntoView {
    let orchestrator = RwSignal::new(Orchestrator::new(HistoryStore::new(LocalStore)));
    let form = RwSignal::new(FormState::new());
    let analyzer = StoredValue::new(FetchAnalyzer::new(build_config()));

    let history = Signal::derive(move || orchestrator.with(|o| o.history().to_vec()));
    let error = Signal::derive(move || orchestrator.with(|o| o.error().map(str::to_string)));
    let phase = Signal::derive(move || orchestrator.with(|o| o.phase()));
    let has_history = Signal::derive(move || orchestrator.with(|o| !o.history().is_empty()));
    let is_submitting = Signal::derive(move || phase.get() == Phase::Submitting);

    // ファイル選択（Data URLで読み込んでから状態に反映）
    let on_file_selected = move |file: File| {
        orchestrator.update(|o| o.dismiss_error());
        let name = file.name();

        spawn_local(async move {
            let selected = read_data_url(&file)
                .await
                .map_err(AnalysisError::Encoding)
                .and_then(|data_url| SelectedFile::from_data_url(name, &data_url));

            match selected {
                Ok(selected) => form.update(|f| f.select_file(selected)),
                Err(e) => {
                    tracing::warn!(error = %e, "could not read selected file");
                    form.update(|f| f.clear_file());
                    orchestrator.update(|o| o.fail(&e));
                }
            }
        });
    };

    // 解析実行
    let on_analyze = move |_: ()| {
        let mut pending = None;
        orchestrator.update(|o| pending = form.with_untracked(|f| o.begin_submit(f)));
        let Some(pending) = pending else {
            return;
        };
        let analyzer = analyzer.get_value();

        spawn_local(async move {
            let outcome = analyzer.analyze(&pending.request).await;
            orchestrator.update(|o| {
                o.complete(pending, outcome);
            });
        });
    };

    let on_clear_history = clear_history_handler(orchestrator);

    view! {
        <div class="container">
            <Header has_history=has_history on_clear_history=on_clear_history />

            <main class="main-content">
                <UploadArea
                    form=form
                    phase=phase
                    on_file_selected=on_file_selected
                    on_analyze=on_analyze
                />

                <IdentityFields form=form disabled=is_submitting />

                {move || error.get().map(|message| view! {
                    <div class="error-message">
                        <span>{message}</span>
                        <button
                            class="btn btn-tertiary btn-small"
                            on:click=move |_| orchestrator.update(|o| o.dismiss_error())
                        >
                            "閉じる"
                        </button>
                    </div>
                })}

                <HistoryPanel history=history />
            </main>
        </div>
    }
}

/// 履歴削除ボタンのハンドラ（`Show` の子から呼ぶためスレッド間で共有可能）
fn clear_history_handler<S>(
    orchestrator: RwSignal<Orchestrator<S>>,
) -> impl Fn(()) + Clone + Send + Sync + 'static
where
    S: KeyValueStore + Send + Sync + 'static,
{
    move |_: ()| orchestrator.update(|o| o.clear_history())
}
