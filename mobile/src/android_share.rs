// Android share sheet via JNI
// Builds an ACTION_SEND intent carrying EXTRA_TEXT and starts it through
// Intent.createChooser so the user picks the target app.

use crate::models::ShareRequest;

use jni::objects::{JObject, JValue};

/// Open the platform chooser for a plain-text share. Failures are logged only.
pub fn share_text(request: &ShareRequest) {
    if let Err(e) = share_text_inner(request) {
        log::error!("Failed to open share chooser: {}", e);
    }
}

fn share_text_inner(request: &ShareRequest) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm() as _) }?;
    let activity = unsafe { JObject::from_raw(ctx.context() as _) };
    let mut env = vm.attach_current_thread()?;

    let intent_class = env.find_class("android/content/Intent")?;
    let action = env.new_string("android.intent.action.SEND")?;
    let send_intent = env.new_object(
        &intent_class,
        "(Ljava/lang/String;)V",
        &[JValue::Object(&action)],
    )?;

    let extra_key = env.new_string("android.intent.extra.TEXT")?;
    let extra_value = env.new_string(&request.text)?;
    env.call_method(
        &send_intent,
        "putExtra",
        "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&extra_key), JValue::Object(&extra_value)],
    )?;

    let mime_type = env.new_string(request.mime_type)?;
    env.call_method(
        &send_intent,
        "setType",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&mime_type)],
    )?;

    let chooser = env
        .call_static_method(
            &intent_class,
            "createChooser",
            "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
            &[JValue::Object(&send_intent), JValue::Object(&JObject::null())],
        )?
        .l()?;

    match env.call_method(
        &activity,
        "startActivity",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(&chooser)],
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            // ActivityNotFoundException and friends are left to the platform
            env.exception_clear()?;
            log::warn!("startActivity for share chooser failed: {}", e);
            Ok(())
        }
    }
}
