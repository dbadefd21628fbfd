use crate::e2e::helpers;

use helpers::fake_twilio::REJECTED_NUMBER;
use helpers::{TestContext, TEST_ACCOUNT_SID, TEST_FROM_NUMBER, TEST_MESSAGE};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_to_dispatch_an_empty_list(ctx: &TestContext) {
    let response = ctx.client.post_empty("/api/campaign/dispatch").await.unwrap();

    response
        .assert_status(StatusCode::PRECONDITION_FAILED)
        .assert_error_message("Please add at least one phone number to the list");
    assert!(ctx.twilio.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_english_message_to_every_recipient(ctx: &TestContext) {
    ctx.add_recipient("+91", "1234567890").await;
    ctx.add_recipient("+1", "5551234567").await;

    let response = ctx.client.post_empty("/api/campaign/dispatch").await.unwrap();

    response.assert_status(StatusCode::OK);
    let summary = response.body.as_ref().unwrap();
    assert_eq!(summary["attempted"], 2);
    assert_eq!(summary["succeeded"], 2);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["render_mode"], "spoken_text");
    assert_eq!(summary["attempts"][0]["recipient"], "+911234567890");
    assert_eq!(summary["attempts"][1]["recipient"], "+15551234567");
    assert_eq!(summary["attempts"][0]["outcome"]["result"], "success");
    assert_eq!(summary["attempts"][0]["outcome"]["provider_status"], "queued");

    let calls = ctx.twilio.calls();
    assert_eq!(calls.len(), 2);
    // Every number is dialed under the outbound country code
    assert_eq!(calls[0].to, "+911234567890");
    assert_eq!(calls[1].to, "+915551234567");
    for call in &calls {
        assert_eq!(call.account_sid, TEST_ACCOUNT_SID);
        assert_eq!(call.from, TEST_FROM_NUMBER);
        assert!(call
            .twiml
            .contains(&format!(r#"<Say voice="alice" language="en-IN">{}</Say>"#, TEST_MESSAGE)));
    }
    assert_eq!(ctx.speech.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reset_the_campaign_after_dispatch(ctx: &TestContext) {
    ctx.add_recipient("+91", "1234567890").await;
    ctx.select_language("hi-IN").await;
    ctx.client.post_empty("/api/campaign/translate").await.unwrap();

    ctx.client
        .post_empty("/api/campaign/dispatch")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let campaign = ctx.client.get("/api/campaign").await.unwrap();
    let view = campaign.body.as_ref().unwrap();
    assert_eq!(view["recipients"], json!([]));
    assert!(view.get("translated_message").is_none());
    assert!(view.get("audio_artifact").is_none());
    assert_eq!(view["message"], TEST_MESSAGE);
    assert_eq!(view["language"]["code"], "hi-IN");

    let status = ctx
        .client
        .get("/api/campaign/dispatch/status")
        .await
        .unwrap();
    assert_eq!(
        status.body.unwrap(),
        json!({ "state": "idle", "completed": 1, "total": 1 })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_rejected_calls_and_continue(ctx: &TestContext) {
    ctx.add_recipient("+91", "1111111111").await;
    ctx.add_recipient("+91", "0000000000").await;
    ctx.add_recipient("+91", "2222222222").await;

    let response = ctx.client.post_empty("/api/campaign/dispatch").await.unwrap();

    response.assert_status(StatusCode::OK);
    let summary = response.body.as_ref().unwrap();
    assert_eq!(summary["attempted"], 3);
    assert_eq!(summary["succeeded"], 2);
    assert_eq!(summary["failed"], 1);

    let failed = &summary["attempts"][1];
    assert_eq!(failed["dialed_number"], REJECTED_NUMBER);
    assert_eq!(failed["outcome"]["result"], "failure");
    assert!(failed["outcome"]["reason"]
        .as_str()
        .unwrap()
        .contains("is not a valid phone number"));

    let dialed: Vec<String> = ctx.twilio.calls().into_iter().map(|c| c.to).collect();
    assert_eq!(dialed, vec!["+911111111111", "+912222222222"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_play_synthesized_audio_for_hindi(ctx: &TestContext) {
    ctx.select_language("hi-IN").await;
    ctx.client.post_empty("/api/campaign/translate").await.unwrap();
    ctx.add_recipient("+91", "1234567890").await;
    ctx.add_recipient("+91", "9876543210").await;

    let response = ctx.client.post_empty("/api/campaign/dispatch").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["render_mode"], "play_audio");

    let calls = ctx.twilio.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].twiml, calls[1].twiml);

    let play = calls[0]
        .twiml
        .split("<Play>")
        .nth(1)
        .and_then(|rest| rest.split("</Play>").next())
        .expect("TwiML should play audio")
        .to_string();
    assert!(play.starts_with(&format!("{}/media/", ctx.base_url)));
    assert_eq!(ctx.speech.calls(), 1);

    // The provider can fetch what it was told to play
    let media_path = play.trim_start_matches(&ctx.base_url);
    let audio = ctx.client.get(media_path).await.unwrap();
    audio
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg");
    assert_eq!(
        String::from_utf8(audio.body_bytes.clone()).unwrap(),
        format!("ID3:MF4J4IDTRo0AxOO4dpFR:[hi-IN] {}", TEST_MESSAGE)
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_generated_audio_across_dispatches(ctx: &TestContext) {
    ctx.select_language("mr-IN").await;

    let response = ctx.client.post_empty("/api/campaign/audio").await.unwrap();
    response.assert_status(StatusCode::OK);
    let url = response.body.as_ref().unwrap()["url"]
        .as_str()
        .unwrap()
        .to_string();

    for number in ["1111111111", "2222222222"] {
        ctx.add_recipient("+91", number).await;
        ctx.client
            .post_empty("/api/campaign/dispatch")
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert_eq!(ctx.speech.calls(), 1);
    for call in ctx.twilio.calls() {
        assert!(call.twiml.contains(&format!("<Play>{}</Play>", url)));
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_provider_speech_when_synthesis_fails(ctx: &TestContext) {
    ctx.speech.fail();
    ctx.select_language("te-IN").await;
    ctx.add_recipient("+91", "1234567890").await;

    let response = ctx.client.post_empty("/api/campaign/dispatch").await.unwrap();

    response.assert_status(StatusCode::OK);
    let summary = response.body.as_ref().unwrap();
    assert_eq!(summary["render_mode"], "spoken_text");
    assert_eq!(summary["succeeded"], 1);
    assert!(summary["fallback_reason"].as_str().is_some());

    let calls = ctx.twilio.calls();
    assert!(calls[0]
        .twiml
        .contains(r#"<Say voice="Google.te-IN-Standard-A" language="te-IN">"#));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_audio_generation_for_native_language(ctx: &TestContext) {
    let response = ctx.client.post_empty("/api/campaign/audio").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.speech.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_bad_gateway_when_audio_generation_fails(ctx: &TestContext) {
    ctx.speech.fail();
    ctx.select_language("hi-IN").await;

    let response = ctx.client.post_empty("/api/campaign/audio").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("quota exceeded");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_cancel_with_no_content_when_idle(ctx: &TestContext) {
    let response = ctx
        .client
        .post_empty("/api/campaign/dispatch/cancel")
        .await
        .unwrap();

    response.assert_status(StatusCode::NO_CONTENT);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_media(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/media/00000000-0000-0000-0000-000000000000")
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_campaign_progress_while_dispatching(ctx: &TestContext) {
    ctx.add_recipient("+91", "1234567890").await;
    ctx.twilio.hold_calls();

    let read_during_dispatch = async {
        ctx.twilio.wait_for_held_call().await;
        let campaign = tokio::time::timeout(
            Duration::from_secs(2),
            ctx.client.get("/api/campaign"),
        )
        .await
        .expect("campaign view blocked behind the dispatch");
        ctx.twilio.release_call();
        campaign
    };
    let (dispatch, campaign) = tokio::join!(
        ctx.client.post_empty("/api/campaign/dispatch"),
        read_during_dispatch
    );

    let campaign = campaign.unwrap();
    campaign.assert_status(StatusCode::OK);
    let view = campaign.body.as_ref().unwrap();
    assert_eq!(view["recipients"], json!(["+911234567890"]));
    assert_eq!(
        view["dispatch"],
        json!({ "state": "dispatching", "completed": 0, "total": 1 })
    );

    dispatch.unwrap().assert_status(StatusCode::OK);
    assert_eq!(ctx.twilio.calls().len(), 1);
}
