use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

use crate::constants::{MODEL_CONFIG_FILE, MODEL_WEIGHTS_FILE};

struct SentenceBertImpl {
    bert: BertModel,
    hidden_size: usize,
    max_position_embeddings: usize,
}

impl SentenceBertImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        // sentence-transformers exports store the encoder without a prefix;
        // checkpoints converted from classification heads keep `bert.` / `roberta.`.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("roberta"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
            max_position_embeddings: config.max_position_embeddings,
        })
    }

    /// Mean of the token states selected by `attention_mask`.
    ///
    /// Shapes: `input_ids`, `token_type_ids`, `attention_mask` are `[1, seq]`;
    /// the result is `[hidden]`. The mask must select at least one token.
    fn forward_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;

        summed.broadcast_div(&counts)?.squeeze(0)
    }
}

/// BERT encoder with mean pooling (sentence-transformers layout).
#[derive(Clone)]
pub struct SentenceBert(std::sync::Arc<SentenceBertImpl>);

impl SentenceBert {
    /// Loads `config.json` + `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join(MODEL_CONFIG_FILE);
        let weights_path = model_dir.join(MODEL_WEIGHTS_FILE);

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = SentenceBertImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }

    /// Longest token sequence the position embeddings cover.
    pub fn max_position_embeddings(&self) -> usize {
        self.0.max_position_embeddings
    }

    pub fn forward_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0
            .forward_pooled(input_ids, token_type_ids, attention_mask)
    }
}
