pub mod audio_publisher;
pub mod elevenlabs_speech_repository;
pub mod openai_translation_repository;
pub mod polly_speech_repository;
pub mod speech_repository;
pub mod telephony_repository;
pub mod translation_repository;
pub mod twilio_call_repository;

pub use audio_publisher::{AudioPublisher, HostedAudioPublisher, PublishError};
pub use elevenlabs_speech_repository::ElevenLabsSpeechRepository;
pub use openai_translation_repository::OpenAiTranslationRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use speech_repository::{DisabledSpeechRepository, SpeechRepository, SynthesisError};
pub use telephony_repository::{PlacedCall, PlacementError, TelephonyRepository};
pub use translation_repository::{
    PassthroughTranslationRepository, TranslationError, TranslationRepository,
};
pub use twilio_call_repository::{TwilioCallRepository, TwilioCredentials};
