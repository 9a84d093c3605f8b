//! 氏名・CPF入力コンポーネント

use doc_verify_common::FormState;
use leptos::prelude::*;

#[component]
pub fn IdentityFields(
    form: RwSignal<FormState>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="name">"氏名"</label>
                    <input
                        type="text"
                        id="name"
                        placeholder="João da Silva"
                        prop:value=move || form.with(|f| f.name.clone())
                        prop:disabled=move || disabled.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.set_name(value));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="national-id">"CPF"</label>
                    <input
                        type="text"
                        id="national-id"
                        inputmode="numeric"
                        placeholder="000.000.000-00"
                        prop:value=move || form.with(|f| f.national_id().to_string())
                        prop:disabled=move || disabled.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| {
                                f.set_national_id(&value);
                            });
                        }
                    />
                </div>
            </div>
        </div>
    }
}
